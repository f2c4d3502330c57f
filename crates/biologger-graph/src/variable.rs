//! Trackable variable definitions and the variable library.

use crate::chart::Domain;
use crate::error::{GraphError, GraphResult};
use indexmap::IndexMap;

/// How a logged value relates to the day it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoggingMode {
    /// A rating-style value averaged over the day. The graph domain is fixed
    /// to the configured band.
    Summary,
    /// A snapshot measurement. The graph domain grows to include observed extremes.
    #[default]
    PointInTime,
}

/// The configured band of a variable, in absolute units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ValueRange {
    /// `baseline ± max_abs_value`
    Deviation {
        #[cfg_attr(feature = "serde", serde(rename = "maxAbsValue"))]
        max_abs_value: f64,
    },
    /// Explicit absolute bounds.
    Bounds { min: f64, max: f64 },
}

/// Marker drawn at data points of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Diamond,
    Triangle,
    Cross,
}

/// Definition of a trackable metric.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Variable {
    pub id: String,
    pub label: String,
    /// Absolute reference value; logged values are deviations from it.
    pub baseline: f64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub range: ValueRange,
    /// Smallest meaningful increment. Also decides label precision.
    pub step_size: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: String,
    /// Overrides the precision derived from `step_size`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub decimals: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logging_mode: LoggingMode,
    /// Whether the variable is drawn on the trend graph.
    #[cfg_attr(feature = "serde", serde(default = "default_graph_series"))]
    pub graph_series: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub marker: MarkerShape,
}

#[cfg(feature = "serde")]
fn default_graph_series() -> bool {
    true
}

/// Most fractional digits ever derived from a step size.
const MAX_DERIVED_DECIMALS: usize = 6;

impl Variable {
    /// Create a point-in-time variable with a symmetric band around `baseline`.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        baseline: f64,
        max_abs_value: f64,
        step_size: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            baseline,
            range: ValueRange::Deviation { max_abs_value },
            step_size,
            unit: String::new(),
            decimals: None,
            logging_mode: LoggingMode::default(),
            graph_series: true,
            color: None,
            marker: MarkerShape::default(),
        }
    }

    /// Replace the symmetric band with explicit absolute bounds.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.range = ValueRange::Bounds { min, max };
        self
    }

    /// Set the display unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the logging mode.
    pub fn with_mode(mut self, mode: LoggingMode) -> Self {
        self.logging_mode = mode;
        self
    }

    /// Set explicit label precision.
    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Set the series color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the marker shape.
    pub fn with_marker(mut self, marker: MarkerShape) -> Self {
        self.marker = marker;
        self
    }

    /// Exclude the variable from the trend graph.
    pub fn hidden_from_graph(mut self) -> Self {
        self.graph_series = false;
        self
    }

    /// Check the definition's invariants.
    pub fn validate(&self) -> GraphResult<()> {
        if self.id.is_empty() {
            return Err(GraphError::invalid_variable(&self.id, "id is empty"));
        }
        if !self.baseline.is_finite() {
            return Err(GraphError::invalid_variable(&self.id, "baseline is not finite"));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(GraphError::invalid_variable(
                &self.id,
                format!("stepSize must be > 0, got {}", self.step_size),
            ));
        }
        match self.range {
            ValueRange::Deviation { max_abs_value } => {
                if !(max_abs_value.is_finite() && max_abs_value > 0.0) {
                    return Err(GraphError::invalid_variable(
                        &self.id,
                        format!("maxAbsValue must be > 0, got {}", max_abs_value),
                    ));
                }
            }
            ValueRange::Bounds { min, max } => {
                if !(min.is_finite() && max.is_finite()) || min > max {
                    return Err(GraphError::invalid_variable(
                        &self.id,
                        format!("bounds must satisfy min <= max, got [{}, {}]", min, max),
                    ));
                }
            }
        }
        Ok(())
    }

    /// The configured band in absolute units, ignoring any data.
    pub fn band(&self) -> Domain {
        match self.range {
            ValueRange::Deviation { max_abs_value } => Domain::new(
                self.baseline - max_abs_value,
                self.baseline + max_abs_value,
            ),
            ValueRange::Bounds { min, max } => Domain::new(min, max),
        }
    }

    /// Convert a relative (logged) value to an absolute one.
    #[inline]
    pub fn absolute(&self, relative: f64) -> f64 {
        self.baseline + relative
    }

    /// Number of fractional digits used when formatting values.
    pub fn decimal_places(&self) -> usize {
        match self.decimals {
            Some(decimals) => decimals as usize,
            None => decimal_places_of(self.step_size),
        }
    }

    /// Format an absolute value with this variable's precision and unit.
    pub fn format_value(&self, value: f64) -> String {
        format_value(value, self)
    }
}

/// Format an absolute value for axis labels, e.g. `"78.5kg"`.
pub fn format_value(value: f64, variable: &Variable) -> String {
    let decimals = variable.decimal_places();
    format!("{:.*}{}", decimals, value, variable.unit)
}

/// Fractional digits in the shortest decimal form of `step`, capped.
pub(crate) fn decimal_places_of(step: f64) -> usize {
    let text = step.to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction.len().min(MAX_DERIVED_DECIMALS),
        None => 0,
    }
}

/// Immutable, insertion-ordered lookup table of variables keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableLibrary {
    variables: IndexMap<String, Variable>,
}

impl VariableLibrary {
    /// Build a library, validating every variable and rejecting repeated ids.
    pub fn from_variables(variables: impl IntoIterator<Item = Variable>) -> GraphResult<Self> {
        let mut map = IndexMap::new();
        for variable in variables {
            variable.validate()?;
            if map.contains_key(&variable.id) {
                return Err(GraphError::DuplicateVariable(variable.id));
            }
            map.insert(variable.id.clone(), variable);
        }
        Ok(Self { variables: map })
    }

    /// Parse a JSON array of variable definitions.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> GraphResult<Self> {
        let variables: Vec<Variable> = serde_json::from_str(json)?;
        Self::from_variables(variables)
    }

    /// The application's default variable set.
    pub fn default_library() -> Self {
        use LoggingMode::{PointInTime, Summary};
        use MarkerShape::*;

        let variables = [
            Variable::new("bodyweight", "BODYWEIGHT", 80.0, 10.0, 0.1)
                .with_unit("kg")
                .with_decimals(1)
                .with_mode(PointInTime)
                .with_color("#2563eb")
                .with_marker(Circle),
            Variable::new("waist", "WAIST", 85.0, 10.0, 0.5)
                .with_unit("cm")
                .with_decimals(1)
                .with_mode(PointInTime)
                .with_color("#8b5cf6")
                .with_marker(Diamond),
            Variable::new("sleep", "SLEEP", 7.0, 4.0, 0.25)
                .with_unit("hrs")
                .with_decimals(1)
                .with_mode(Summary)
                .with_color("#22c55e")
                .with_marker(Square),
            Variable::new("energy", "ENERGY", 5.0, 5.0, 0.5)
                .with_unit("/10")
                .with_decimals(0)
                .with_mode(Summary)
                .with_color("#ec4899")
                .with_marker(Circle),
            Variable::new("mood", "MOOD", 5.0, 5.0, 1.0)
                .with_unit("/10")
                .with_decimals(0)
                .with_mode(Summary)
                .with_color("#06b6d4")
                .with_marker(Triangle),
            Variable::new("focus", "FOCUS", 5.0, 5.0, 1.0)
                .with_unit("/10")
                .with_decimals(0)
                .with_mode(Summary)
                .with_color("#f59e0b")
                .with_marker(Diamond)
                .hidden_from_graph(),
            Variable::new("anxiety", "ANXIETY", 3.0, 5.0, 1.0)
                .with_unit("/10")
                .with_decimals(0)
                .with_mode(Summary)
                .with_color("#ef4444")
                .with_marker(Triangle)
                .hidden_from_graph(),
        ];

        Self {
            variables: variables
                .into_iter()
                .map(|v| (v.id.clone(), v))
                .collect(),
        }
    }

    /// Look up a variable by id.
    pub fn get(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    /// Whether a variable with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.variables.contains_key(id)
    }

    /// All variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Variables flagged for the trend graph, in insertion order.
    pub fn graphable(&self) -> impl Iterator<Item = &Variable> {
        self.iter().filter(|v| v.graph_series)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band() {
        let var = Variable::new("bw", "BW", 80.0, 10.0, 0.5);
        assert_eq!(var.band(), Domain::new(70.0, 90.0));

        let bounded = var.with_bounds(73.5, 83.5);
        assert_eq!(bounded.band(), Domain::new(73.5, 83.5));
    }

    #[test]
    fn test_validate() {
        assert!(Variable::new("ok", "OK", 5.0, 5.0, 1.0).validate().is_ok());

        let zero_range = Variable::new("bad", "BAD", 5.0, 0.0, 1.0);
        assert!(matches!(
            zero_range.validate(),
            Err(GraphError::InvalidVariable { .. })
        ));

        let zero_step = Variable::new("bad", "BAD", 5.0, 5.0, 0.0);
        assert!(zero_step.validate().is_err());

        let inverted = Variable::new("bad", "BAD", 5.0, 5.0, 1.0).with_bounds(3.0, 1.0);
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_format_value() {
        let weight = Variable::new("bw", "BW", 78.5, 5.0, 0.5).with_unit("kg");
        assert_eq!(weight.format_value(78.5), "78.5kg");

        let sleep = Variable::new("sleep", "SLEEP", 7.0, 3.0, 0.25).with_unit("h");
        assert_eq!(sleep.format_value(7.5), "7.50h");

        let mood = Variable::new("mood", "MOOD", 5.0, 5.0, 1.0).with_unit("/10");
        assert_eq!(mood.format_value(8.0), "8/10");

        let fixed = Variable::new("e", "E", 5.0, 5.0, 0.5).with_decimals(0);
        assert_eq!(fixed.format_value(6.4), "6");
    }

    #[test]
    fn test_decimal_places_of() {
        assert_eq!(decimal_places_of(1.0), 0);
        assert_eq!(decimal_places_of(0.1), 1);
        assert_eq!(decimal_places_of(0.25), 2);
        assert_eq!(decimal_places_of(1e-9), MAX_DERIVED_DECIMALS);
    }

    #[test]
    fn test_library_rejects_duplicates() {
        let result = VariableLibrary::from_variables([
            Variable::new("a", "A", 0.0, 1.0, 1.0),
            Variable::new("a", "A2", 0.0, 1.0, 1.0),
        ]);
        assert_eq!(result, Err(GraphError::DuplicateVariable("a".to_string())));
    }

    #[test]
    fn test_default_library() {
        let library = VariableLibrary::default_library();
        assert_eq!(library.len(), 7);
        assert!(library.iter().all(|v| v.validate().is_ok()));

        let graphable: Vec<&str> = library.graphable().map(|v| v.id.as_str()).collect();
        assert_eq!(graphable, ["bodyweight", "waist", "sleep", "energy", "mood"]);
        assert_eq!(
            library.get("sleep").map(|v| v.logging_mode),
            Some(LoggingMode::Summary)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_library_from_json() {
        let json = r#"[
            {"id": "bodyweight", "label": "BODYWEIGHT", "baseline": 80, "maxAbsValue": 10,
             "stepSize": 0.1, "unit": "kg", "loggingMode": "point_in_time"},
            {"id": "mood", "label": "MOOD", "baseline": 5, "min": 0, "max": 10,
             "stepSize": 1, "loggingMode": "summary", "marker": "triangle", "graphSeries": false}
        ]"#;

        let library = VariableLibrary::from_json(json).unwrap();
        let bodyweight = library.get("bodyweight").unwrap();
        assert_eq!(bodyweight.range, ValueRange::Deviation { max_abs_value: 10.0 });
        assert!(bodyweight.graph_series);

        let mood = library.get("mood").unwrap();
        assert_eq!(mood.range, ValueRange::Bounds { min: 0.0, max: 10.0 });
        assert_eq!(mood.marker, MarkerShape::Triangle);
        assert!(!mood.graph_series);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_library_from_json_validates() {
        let json = r#"[{"id": "x", "label": "X", "baseline": 0, "maxAbsValue": -1, "stepSize": 1}]"#;
        assert!(matches!(
            VariableLibrary::from_json(json),
            Err(GraphError::InvalidVariable { .. })
        ));

        assert!(matches!(
            VariableLibrary::from_json("not json"),
            Err(GraphError::Parse(_))
        ));
    }
}
