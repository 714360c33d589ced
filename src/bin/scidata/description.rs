//! JSON description of a field and its axes.
//!
//! ```json
//! {
//!   "name": "field", "symbol": "X",
//!   "axes": [
//!     { "name": "time", "unit": "s", "kind": "linspace",
//!       "initial": 0, "final": 10, "number": 10, "period_count": 5 }
//!   ],
//!   "values": [50, 55]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scidata::{Axis, Field, Pattern};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldDescription {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub unit: String,
    pub axes: Vec<AxisDescription>,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AxisDescription {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(flatten)]
    pub kind: KindDescription,
    #[serde(default)]
    pub period_count: Option<usize>,
    #[serde(default)]
    pub is_antiperiod: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KindDescription {
    Linspace {
        initial: f64,
        #[serde(rename = "final")]
        final_value: f64,
        number: usize,
        #[serde(default)]
        include_endpoint: bool,
    },
    Values {
        values: Vec<f64>,
    },
    Pattern {
        unique_values: Vec<f64>,
        unique_indices: Vec<usize>,
        rebuild_indices: Vec<usize>,
        #[serde(default)]
        whole_values: Option<Vec<f64>>,
        #[serde(default = "default_step")]
        is_step: bool,
    },
}

fn default_step() -> bool {
    true
}

impl AxisDescription {
    pub fn build(&self) -> Result<Axis> {
        let name = self.name.as_str();
        let axis = match &self.kind {
            KindDescription::Linspace {
                initial,
                final_value,
                number,
                include_endpoint,
            } => {
                Axis::linspace(
                    name,
                    &self.unit,
                    *initial,
                    *final_value,
                    *number,
                    *include_endpoint,
                )?
            }
            KindDescription::Values { values } => Axis::values(name, &self.unit, values.clone())?,
            KindDescription::Pattern {
                unique_values,
                unique_indices,
                rebuild_indices,
                whole_values,
                is_step,
            } => {
                let mut pattern = Pattern::new(
                    unique_values.clone(),
                    unique_indices.clone(),
                    rebuild_indices.clone(),
                )
                .with_step(*is_step);
                if let Some(whole) = whole_values {
                    pattern = pattern.with_whole(whole.clone());
                }
                Axis::pattern(name, &self.unit, pattern)?
            }
        };
        match self.period_count {
            Some(p) => Ok(axis.get_axis_periodic(p, self.is_antiperiod)?),
            None => Ok(axis),
        }
    }
}

impl FieldDescription {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn build(&self) -> Result<Field> {
        let axes = self
            .axes
            .iter()
            .map(|a| a.build().map(Arc::new).with_context(|| format!("axis '{}'", a.name)))
            .collect::<Result<Vec<_>>>()?;
        let field = Field::new(&self.name, &self.symbol, axes, self.values.clone())
            .with_context(|| format!("field '{}'", self.name))?;
        Ok(field.with_unit(&self.unit))
    }
}
