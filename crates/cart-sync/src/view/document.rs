//! In-memory page model.
//!
//! Holds just enough of a rendered cart page to satisfy [`CartView`]: text
//! elements by id, line-item rows by product id, cookies, and the
//! notifications raised so far. The CLI seeds one per command and tests
//! assert against it.

use std::collections::BTreeMap;
use std::fmt;

use super::{ids, CartView, ControlState, Notification, ProductId, DATA_MAX};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    /// Injected markup, for containers such as the mini-cart
    pub html: Option<String>,
    pub visible: bool,
}

impl Element {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: None,
            visible: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }
}

/// The increase button inside a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncreaseControl {
    /// The button's own `data-max`, which wins over the row's
    pub data_max: Option<String>,
    pub state: ControlState,
}

/// A line-item row (`data-product-row-id`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub attributes: BTreeMap<String, String>,
    pub increase: Option<IncreaseControl>,
    /// Ids of elements rendered inside the row
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    rows: BTreeMap<ProductId, Row>,
    cookies: String,
    notifications: Vec<Notification>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page header pieces: the count badge, the mini-cart container and the
    /// cart total.
    pub fn cart_page() -> Self {
        Self::new()
            .with_element(ids::CART_COUNT, Element::with_text("0"))
            .with_element(ids::MINI_CART, Element::hidden())
            .with_element(ids::CART_TOTAL, Element::with_text(""))
    }

    pub fn with_element(mut self, id: impl Into<String>, element: Element) -> Self {
        self.elements.insert(id.into(), element);
        self
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = cookies.into();
        self
    }

    /// Add a fully rendered line item: its row, quantity and price cells, the
    /// max-stock message slot, and an increase button.
    pub fn with_line_item(
        mut self,
        product_id: impl Into<ProductId>,
        quantity: u64,
        price: impl Into<String>,
        data_max: Option<u64>,
    ) -> Self {
        self.insert_line_item(product_id, quantity, price, data_max);
        self
    }

    /// Render a line item into an existing page, as a full page refresh
    /// would after an add-to-cart.
    pub fn insert_line_item(
        &mut self,
        product_id: impl Into<ProductId>,
        quantity: u64,
        price: impl Into<String>,
        data_max: Option<u64>,
    ) {
        let product_id = product_id.into();
        let children = vec![
            ids::quantity(&product_id),
            ids::price(&product_id),
            ids::max_msg(&product_id),
        ];
        self.elements.insert(
            children[0].clone(),
            Element::with_text(quantity.to_string()),
        );
        self.elements
            .insert(children[1].clone(), Element::with_text(price));
        self.elements.insert(children[2].clone(), Element::hidden());

        let mut attributes = BTreeMap::new();
        attributes.insert(
            "data-product-row-id".to_string(),
            product_id.as_str().to_string(),
        );
        if let Some(max) = data_max {
            attributes.insert(DATA_MAX.to_string(), max.to_string());
        }

        let state = match data_max {
            Some(max) => ControlState::for_quantity(quantity, max),
            None => ControlState::enabled(),
        };

        self.rows.insert(
            product_id,
            Row {
                attributes,
                increase: Some(IncreaseControl {
                    data_max: None,
                    state,
                }),
                children,
            },
        );
    }

    pub fn with_row(mut self, product_id: impl Into<ProductId>, row: Row) -> Self {
        self.rows.insert(product_id.into(), row);
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text.as_str())
    }

    pub fn row(&self, product_id: &ProductId) -> Option<&Row> {
        self.rows.get(product_id)
    }

    pub fn has_row(&self, product_id: &ProductId) -> bool {
        self.rows.contains_key(product_id)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

impl CartView for Document {
    fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.text = text.to_string();
                true
            }
            None => false,
        }
    }

    fn show_fragment(&mut self, id: &str, html: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.html = Some(html.to_string());
                element.visible = true;
                true
            }
            None => false,
        }
    }

    fn element_text(&self, id: &str) -> Option<String> {
        self.text(id).map(str::to_string)
    }

    fn hide(&mut self, id: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.visible = false;
        }
    }

    fn remove_row(&mut self, product_id: &ProductId) -> bool {
        let Some(row) = self.rows.remove(product_id) else {
            return false;
        };
        for child in &row.children {
            self.elements.remove(child);
        }
        true
    }

    fn row_attribute(&self, product_id: &ProductId, name: &str) -> Option<String> {
        self.rows
            .get(product_id)
            .and_then(|row| row.attributes.get(name).cloned())
    }

    fn increase_control(&self, product_id: &ProductId) -> Option<IncreaseControl> {
        self.rows
            .get(product_id)
            .and_then(|row| row.increase.clone())
    }

    fn set_increase_control(&mut self, product_id: &ProductId, state: &ControlState) {
        if let Some(control) = self
            .rows
            .get_mut(product_id)
            .and_then(|row| row.increase.as_mut())
        {
            control.state = state.clone();
        }
    }

    fn cookies(&self) -> String {
        self.cookies.clone()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, element) in &self.elements {
            let visibility = if element.visible { "" } else { " (hidden)" };
            match &element.html {
                Some(html) => writeln!(f, "#{}{}: {}", id, visibility, html.trim())?,
                None => writeln!(f, "#{}{}: {}", id, visibility, element.text)?,
            }
        }
        for (product_id, row) in &self.rows {
            if let Some(control) = &row.increase {
                writeln!(
                    f,
                    "row {}: increase [{}]{}",
                    product_id,
                    control.state.label,
                    if control.state.disabled {
                        " disabled"
                    } else {
                        ""
                    }
                )?;
            }
        }
        Ok(())
    }
}
