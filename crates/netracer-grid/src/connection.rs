//! Network connection records.
//!
//! The backend's aggregated connection endpoint returns a JSON array of
//! [`Connection`]s. Aggregation merges addresses into space-separated lists
//! and ports into comma-separated lists, which is why the preset columns
//! render addresses as lists and filter ports by numeric range.

use serde::{Deserialize, Serialize};

use crate::column::{CellDisplay, Column};
use crate::error::Result;
use crate::filter::FilterVariant;
use crate::record::Record;
use crate::value::{Number, Value};

/// Protocols offered by the protocol select filter.
pub const PROTOCOLS: [&str; 2] = ["TCP", "UDP"];

/// Date format of the last-seen column.
pub const LAST_SEEN_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Endpoints of a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Source address, or several separated by spaces.
    pub src: String,
    /// Destination address, or several separated by spaces.
    pub dst: String,
    /// `TCP` or `UDP`.
    pub protocol: String,
    /// Destination port, or several separated by commas.
    pub port: String,
}

/// One row of the connection table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Endpoints.
    pub addr: Address,
    /// Last time the connection was seen, in seconds since the Unix epoch.
    pub time: u64,
    #[serde(default)]
    pub max_speed: u32,
    #[serde(default)]
    pub avg_speed: u32,
}

impl Record for Connection {
    fn field(&self, path: &str) -> Value<'_> {
        match path {
            "addr.src" => Value::String(&self.addr.src),
            "addr.dst" => Value::String(&self.addr.dst),
            "addr.protocol" => Value::String(&self.addr.protocol),
            "addr.port" => Value::String(&self.addr.port),
            "time" => Value::Number(Number::from(self.time)),
            "max_speed" => Value::Number(Number::from(self.max_speed)),
            "avg_speed" => Value::Number(Number::from(self.avg_speed)),
            _ => Value::None,
        }
    }
}

/// Decodes a connection endpoint response body.
pub fn parse_connections(body: &str) -> Result<Vec<Connection>> {
    let connections: Vec<Connection> = serde_json::from_str(body)?;
    log::debug!("decoded {} connections", connections.len());
    Ok(connections)
}

/// Builds the connection table's columns.
pub fn connection_columns() -> Vec<Column> {
    vec![
        Column::new("addr_src")
            .path("addr.src")
            .header("Sources")
            .filter(FilterVariant::Text)
            .display(CellDisplay::List)
            .expandable(true),
        Column::new("addr_dst")
            .path("addr.dst")
            .header("Destination")
            .filter(FilterVariant::Text)
            .display(CellDisplay::List)
            .expandable(true),
        Column::new("addr_port")
            .path("addr.port")
            .header("Port")
            .filter(FilterVariant::Range)
            .expandable(true),
        Column::new("addr_protocol")
            .path("addr.protocol")
            .header("Protocol")
            .filter(FilterVariant::Select)
            .options(PROTOCOLS),
        Column::new("time")
            .header("LastTime")
            .filter(FilterVariant::DateTime)
            .display(CellDisplay::DateTime)
            .date_format(LAST_SEEN_FORMAT),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::CellContent;

    const BODY: &str = r#"[
        {"addr": {"src": "10.0.0.1 10.0.0.2", "dst": "10.0.0.9", "protocol": "TCP", "port": "22, 80"},
         "time": 1700000000, "max_speed": 0, "avg_speed": 0},
        {"addr": {"src": "10.0.0.3", "dst": "8.8.8.8", "protocol": "UDP", "port": "53"},
         "time": 1700000100}
    ]"#;

    #[test]
    fn parses_response_body() {
        let connections = parse_connections(BODY).unwrap();
        assert_eq!(connections.len(), 2);
        assert_eq!(connections[1].addr.protocol, "UDP");
        assert_eq!(connections[1].max_speed, 0);
    }

    #[test]
    fn rejects_malformed_body() {
        assert!(parse_connections("{\"not\": \"a list\"}").is_err());
    }

    #[test]
    fn field_paths() {
        let c = &parse_connections(BODY).unwrap()[0];
        assert_eq!(c.field("addr.port"), Value::String("22, 80"));
        assert_eq!(c.field("time"), Value::Number(Number::U64(1_700_000_000)));
        assert_eq!(c.field("addr"), Value::None);
    }

    #[test]
    fn preset_columns_render() {
        let columns = connection_columns();
        let c = &parse_connections(BODY).unwrap()[0];

        let headers: Vec<&str> = columns.iter().map(Column::header_label).collect();
        assert_eq!(
            headers,
            vec!["Sources", "Destination", "Port", "Protocol", "LastTime"]
        );
        assert_eq!(
            columns[0].render_record(c),
            CellContent::List(vec!["10.0.0.1".into(), "10.0.0.2".into()])
        );
        assert_eq!(
            columns[4].render_record(c),
            CellContent::Text("14.11.2023 22:13".into())
        );
        assert_eq!(columns[3].select_options(), ["TCP", "UDP"]);
    }
}
