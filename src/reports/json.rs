use crate::Result;
use crate::metrics::MetricValue;
use crate::scoring::ScoreRecord;
use core::fmt::Write;
use serde_json::json;

/// Render one score record as a JSON object.
///
/// Every metric appears under its report key, with its wall-clock cost under
/// `{key}_latency` in integer milliseconds.
#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate<W: Write>(record: &ScoreRecord, pretty: bool, writer: &mut W) -> Result<()> {
    let mut obj = serde_json::Map::new();
    obj.insert("name".to_string(), json!(record.name));
    obj.insert("category".to_string(), json!(record.category.label()));
    obj.insert("net_score".to_string(), json!(record.net_score));
    obj.insert("net_score_latency".to_string(), json!(record.net_score_latency));

    for metric in &record.metrics {
        obj.insert(metric.kind.key().to_string(), metric_value_to_json(&metric.value));
        obj.insert(format!("{}_latency", metric.kind.key()), json!(metric.latency_ms));
    }

    let value = serde_json::Value::Object(obj);
    if pretty {
        write!(writer, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        write!(writer, "{}", serde_json::to_string(&value)?)?;
    }

    Ok(())
}

fn metric_value_to_json(value: &MetricValue) -> serde_json::Value {
    match value {
        MetricValue::Scalar(v) => json!(v),
        MetricValue::PerDevice(scores) => {
            let mut map = serde_json::Map::new();
            for (device, score) in scores.iter() {
                let _ = map.insert(device.to_string(), json!(score));
            }

            serde_json::Value::Object(map)
        }
    }
}
