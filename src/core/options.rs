use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::interaction::InteractionHook;

/// Passthrough chart options plus the two interaction hooks.
///
/// `values` is handed to the plotting library as-is; hooks are kept beside it
/// because closures have no JSON form.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(flatten)]
    values: Map<String, Value>,
    #[serde(skip)]
    on_hover: Option<InteractionHook>,
    #[serde(skip)]
    on_click: Option<InteractionHook>,
}

impl ChartOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            values,
            on_hover: None,
            on_click: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_on_hover(mut self, hook: InteractionHook) -> Self {
        self.on_hover = Some(hook);
        self
    }

    #[must_use]
    pub fn with_on_click(mut self, hook: InteractionHook) -> Self {
        self.on_click = Some(hook);
        self
    }

    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.values
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    #[must_use]
    pub fn on_hover(&self) -> Option<&InteractionHook> {
        self.on_hover.as_ref()
    }

    #[must_use]
    pub fn on_click(&self) -> Option<&InteractionHook> {
        self.on_click.as_ref()
    }

    /// Installs `hook` as hover handler unless one is already set.
    /// Returns `true` when the hook was installed.
    pub fn install_hover_if_absent(&mut self, hook: InteractionHook) -> bool {
        if self.on_hover.is_some() {
            return false;
        }
        self.on_hover = Some(hook);
        true
    }

    /// Installs `hook` as click handler unless one is already set.
    /// Returns `true` when the hook was installed.
    pub fn install_click_if_absent(&mut self, hook: InteractionHook) -> bool {
        if self.on_click.is_some() {
            return false;
        }
        self.on_click = Some(hook);
        true
    }

    /// Shallow merge of a partial options object; keys from `partial` win.
    pub fn merge_shallow(&mut self, partial: &Map<String, Value>) {
        for (key, value) in partial {
            self.values.insert(key.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn legend_display(&self) -> Option<bool> {
        self.values
            .get("legend")
            .and_then(|legend| legend.get("display"))
            .and_then(Value::as_bool)
    }

    /// Sets `legend.display`, keeping any other legend keys. A non-object
    /// `legend` value is replaced.
    pub fn set_legend_display(&mut self, display: bool) {
        let legend = self
            .values
            .entry("legend")
            .or_insert_with(|| Value::Object(Map::new()));
        if !legend.is_object() {
            *legend = Value::Object(Map::new());
        }
        if let Value::Object(legend) = legend {
            legend.insert("display".to_owned(), Value::Bool(display));
        }
    }
}

impl fmt::Debug for ChartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOptions")
            .field("values", &self.values)
            .field("on_hover", &self.on_hover.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}
