use mart_core::{DerivedTable, MartError, MartResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Box,
    Histogram,
    Bar,
    Scatter,
    FacetedScatter,
    /// Plain tabular rendering, no chart
    Table,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Box => "box",
            ChartKind::Histogram => "histogram",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::FacetedScatter => "faceted-scatter",
            ChartKind::Table => "table",
        }
    }
}

/// How bars sharing an x position are laid out when `color` splits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    #[default]
    Stack,
    Group,
}

/// Mapping from table columns to visual channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet: Option<String>,
    /// Column holding fitted trend values drawn over a scatter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
}

impl ChartBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, field: impl Into<String>) -> Self {
        self.x = Some(field.into());
        self
    }

    pub fn y(mut self, field: impl Into<String>) -> Self {
        self.y = Some(field.into());
        self
    }

    pub fn color(mut self, field: impl Into<String>) -> Self {
        self.color = Some(field.into());
        self
    }

    pub fn size(mut self, field: impl Into<String>) -> Self {
        self.size = Some(field.into());
        self
    }

    pub fn facet(mut self, field: impl Into<String>) -> Self {
        self.facet = Some(field.into());
        self
    }

    pub fn trend(mut self, field: impl Into<String>) -> Self {
        self.trend = Some(field.into());
        self
    }

    pub fn bar_mode(mut self, mode: BarMode) -> Self {
        self.bar_mode = Some(mode);
        self
    }

    /// Every bound field as `(channel, field)`.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("x", &self.x),
            ("y", &self.y),
            ("color", &self.color),
            ("size", &self.size),
            ("facet", &self.facet),
            ("trend", &self.trend),
        ]
        .into_iter()
        .filter_map(|(channel, field)| field.as_deref().map(|f| (channel, f)))
    }
}

/// Rendering instruction consumed by the external renderer alongside the
/// table it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartInstruction {
    pub kind: ChartKind,
    pub title: String,
    pub binding: ChartBinding,
    /// Column names of the source table, in order
    pub columns: Vec<String>,
}

impl ChartInstruction {
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.binding.fields().map(|(_, field)| field)
    }
}

/// Maps a derived table plus declared kind and bindings to a chart instruction.
///
/// Fails with [`MartError::Validation`] when a binding names a column the
/// table does not have, or when a chart kind lacks the channels it needs.
pub fn to_chart_spec(
    table: &DerivedTable,
    kind: ChartKind,
    binding: ChartBinding,
    title: &str,
) -> MartResult<ChartInstruction> {
    for (channel, field) in binding.fields() {
        if !table.has_column(field) {
            return Err(MartError::Validation(format!(
                "{channel} binding '{field}' is not a column of the table"
            )));
        }
    }

    let required: Vec<(&str, bool)> = match kind {
        ChartKind::Box | ChartKind::Histogram => vec![("x", binding.x.is_some())],
        ChartKind::Bar | ChartKind::Scatter => {
            vec![("x", binding.x.is_some()), ("y", binding.y.is_some())]
        }
        ChartKind::FacetedScatter => vec![
            ("x", binding.x.is_some()),
            ("y", binding.y.is_some()),
            ("facet", binding.facet.is_some()),
        ],
        ChartKind::Table => Vec::new(),
    };
    if let Some((channel, _)) = required.iter().find(|(_, bound)| !bound) {
        return Err(MartError::Validation(format!(
            "{} chart requires a {channel} binding",
            kind.as_str()
        )));
    }

    Ok(ChartInstruction {
        kind,
        title: title.to_string(),
        binding,
        columns: table.columns().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_counts() -> DerivedTable {
        let mut table = DerivedTable::new(["Product line", "Count"]);
        table
            .push_row(vec!["Food and beverages".into(), 2usize.into()])
            .unwrap();
        table
    }

    #[test]
    fn bar_chart_keeps_names_verbatim() {
        let chart = to_chart_spec(
            &product_counts(),
            ChartKind::Bar,
            ChartBinding::new().x("Product line").y("Count"),
            "Most Frequently Purchased Product Line",
        )
        .unwrap();
        assert_eq!(chart.title, "Most Frequently Purchased Product Line");
        assert_eq!(chart.binding.x.as_deref(), Some("Product line"));
        assert_eq!(chart.columns, vec!["Product line", "Count"]);
        assert_eq!(chart.fields().collect::<Vec<_>>(), vec!["Product line", "Count"]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = to_chart_spec(
            &product_counts(),
            ChartKind::Bar,
            ChartBinding::new().x("Product line").y("Total"),
            "t",
        )
        .unwrap_err();
        assert!(err.to_string().contains("'Total'"));
    }

    #[test]
    fn faceted_scatter_needs_facet() {
        let mut table = DerivedTable::new(["Date", "Total"]);
        table.push_row(vec!["2019-01-05".into(), 1.0.into()]).unwrap();
        let err = to_chart_spec(
            &table,
            ChartKind::FacetedScatter,
            ChartBinding::new().x("Date").y("Total"),
            "t",
        )
        .unwrap_err();
        assert!(err.to_string().contains("facet"));
    }

    #[test]
    fn serializes_without_unbound_channels() {
        let chart = to_chart_spec(
            &product_counts(),
            ChartKind::Table,
            ChartBinding::new(),
            "Counts",
        )
        .unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "table");
        assert!(json["binding"].as_object().unwrap().is_empty());
    }
}
