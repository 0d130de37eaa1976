use crate::error::ExpositionError;
use crate::sample::{Sample, SampleValue};
use crate::validate::{
    escape_help, escape_label_value, is_label_name, is_metric_name, is_numeric_literal,
};

/// One named metric with its help text and samples.
#[derive(Debug, Clone, PartialEq)]
struct SampleGroup {
    name: String,
    help: String,
    samples: Vec<Sample>,
}

/// Accumulates sample groups and renders them as a Prometheus text document.
///
/// Groups are emitted in insertion order and every group is typed `gauge`.
/// All names and values are checked in [`add_group`](Self::add_group), so
/// [`format`](Self::format) cannot fail.
#[derive(Debug, Clone, Default)]
pub struct MetricsDocumentBuilder {
    groups: Vec<SampleGroup>,
}

impl MetricsDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
        samples: Vec<Sample>,
    ) -> Result<(), ExpositionError> {
        let name = name.into();
        if !is_metric_name(&name) {
            return Err(ExpositionError::InvalidMetricName(name));
        }
        if self.groups.iter().any(|g| g.name == name) {
            return Err(ExpositionError::DuplicateGroup(name));
        }

        for sample in &samples {
            if let Some((label, _)) = sample.labels.iter().find(|(k, _)| !is_label_name(k)) {
                return Err(ExpositionError::InvalidLabelName {
                    metric: name,
                    label: label.to_string(),
                });
            }
            match &sample.value {
                SampleValue::Literal(value) if !is_numeric_literal(value) => {
                    return Err(ExpositionError::NonNumericValue {
                        metric: name,
                        value: value.clone(),
                    });
                }
                _ => {}
            }
        }

        self.groups.push(SampleGroup {
            name,
            help: help.into(),
            samples,
        });
        Ok(())
    }

    pub fn nb_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn nb_points(&self) -> usize {
        self.groups.iter().map(|g| g.samples.len()).sum()
    }

    pub fn format(&self) -> String {
        let mut out = String::with_capacity(self.nb_points() * 64);
        for group in &self.groups {
            out.push_str("# HELP ");
            out.push_str(&group.name);
            out.push(' ');
            escape_help(&group.help, &mut out);
            out.push('\n');

            out.push_str("# TYPE ");
            out.push_str(&group.name);
            out.push_str(" gauge\n");

            for sample in &group.samples {
                out.push_str(&group.name);
                if !sample.labels.is_empty() {
                    out.push('{');
                    for (idx, (key, value)) in sample.labels.iter().enumerate() {
                        if idx > 0 {
                            out.push(',');
                        }
                        out.push_str(key);
                        out.push_str("=\"");
                        escape_label_value(value, &mut out);
                        out.push('"');
                    }
                    out.push('}');
                }
                out.push(' ');
                sample.value.write_to(&mut out);
                out.push('\n');
            }
        }
        out
    }
}
