#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// One row of the `access_list` table. Address bounds are kept in the
/// binary form they are stored in; use the `_text` helpers for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccessEntry {
    pub id: i64,
    pub name: String,
    pub start: Vec<u8>,
    pub end: Vec<u8>,
    pub level: i64,
    pub user: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub access_type: String,
    pub enabled: bool,
}

impl AccessEntry {
    pub fn start_text(&self) -> String {
        render_addr(&self.start)
    }

    pub fn end_text(&self) -> String {
        render_addr(&self.end)
    }
}

fn render_addr(bin: &[u8]) -> String {
    match bin.len() {
        4 => {
            let mut octets = [0u8; 4];
            octets.copy_from_slice(bin);
            IpAddr::from(octets).to_string()
        }
        16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(bin);
            IpAddr::from(octets).to_string()
        }
        // Unset bounds (e.g. an entry loaded by unknown id) render empty
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ipv4_bounds() {
        let entry = AccessEntry {
            start: vec![10, 0, 0, 1],
            end: vec![10, 0, 0, 254],
            ..Default::default()
        };
        assert_eq!(entry.start_text(), "10.0.0.1");
        assert_eq!(entry.end_text(), "10.0.0.254");
    }

    #[test]
    fn renders_ipv6_bounds() {
        let mut start = vec![0u8; 16];
        start[15] = 1;
        let entry = AccessEntry {
            start,
            ..Default::default()
        };
        assert_eq!(entry.start_text(), "::1");
        assert_eq!(entry.end_text(), "");
    }
}
