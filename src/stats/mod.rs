// Performance data: metric selection, unit normalization and check_mk descriptors
pub mod normalize;
pub mod descriptor;

pub use normalize::{convert_value, metric_id, perf_data_line, select_metrics, MetricFilter, NormalizedMetric};
pub use descriptor::{descriptor_path, metric_title, metric_unit, random_color, render_descriptor, write_descriptor};
