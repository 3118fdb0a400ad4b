//! Queue entities whose metrics can be graphed.
//!
//! Every entity maps onto a dotted series path of the shape
//! `<host>.topic.<topic>[.channel.<channel>]`, where `<host>` is either a
//! sanitized host key or the `*` wildcard matching every host.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Host segment that matches every host.
pub const WILDCARD_HOST: &str = "*";

/// Make a host address safe for a dotted series namespace.
///
/// Every `.` and `:` becomes `_`, so `10.0.0.1:4151` becomes `10_0_0_1_4151`.
pub fn sanitize_host_key(host: &str) -> String {
    host.replace(['.', ':'], "_")
}

/// The entity-specific part of a series name, without metric key or prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPath<'a> {
    host: String,
    topic: &'a str,
    channel: Option<&'a str>,
}

impl<'a> SeriesPath<'a> {
    pub fn new(host: String, topic: &'a str, channel: Option<&'a str>) -> Self {
        Self {
            host,
            topic,
            channel,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn topic(&self) -> &str {
        self.topic
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel
    }
}

impl fmt::Display for SeriesPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.topic.{}", self.host, self.topic)?;
        if let Some(channel) = self.channel {
            write!(f, ".channel.{}", channel)?;
        }
        Ok(())
    }
}

/// A topic summed across every host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topic {
    pub topic_name: String,
}

impl Topic {
    pub fn new(topic_name: impl Into<String>) -> Self {
        Self {
            topic_name: topic_name.into(),
        }
    }

    pub fn series_path(&self) -> SeriesPath<'_> {
        SeriesPath::new(WILDCARD_HOST.to_string(), &self.topic_name, None)
    }
}

/// Topic statistics reported by one host, or aggregated over all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopicHostStats {
    pub topic: String,
    pub host_address: String,
    /// Set when these stats are a sum across hosts.
    #[cfg_attr(feature = "serde", serde(default))]
    pub aggregate: bool,
}

impl TopicHostStats {
    pub fn new(topic: impl Into<String>, host_address: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            host_address: host_address.into(),
            aggregate: false,
        }
    }

    /// Stats summed across every host.
    pub fn aggregate(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            host_address: String::new(),
            aggregate: true,
        }
    }

    pub fn host_key(&self) -> String {
        if self.aggregate {
            WILDCARD_HOST.to_string()
        } else {
            sanitize_host_key(&self.host_address)
        }
    }

    pub fn series_path(&self) -> SeriesPath<'_> {
        SeriesPath::new(self.host_key(), &self.topic, None)
    }
}

/// Channel statistics.
///
/// A channel seen on several hosts carries one entry per host in
/// `host_stats`; a per-host entry leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelStats {
    pub topic: String,
    pub channel_name: String,
    pub host_address: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub host_stats: Vec<ChannelStats>,
}

impl ChannelStats {
    pub fn new(
        topic: impl Into<String>,
        channel_name: impl Into<String>,
        host_address: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            channel_name: channel_name.into(),
            host_address: host_address.into(),
            host_stats: Vec::new(),
        }
    }

    /// Attach per-host entries, turning this into a cross-host view.
    pub fn with_host_stats(mut self, host_stats: Vec<ChannelStats>) -> Self {
        self.host_stats = host_stats;
        self
    }

    pub fn host_key(&self) -> String {
        if self.host_stats.is_empty() {
            sanitize_host_key(&self.host_address)
        } else {
            WILDCARD_HOST.to_string()
        }
    }

    pub fn series_path(&self) -> SeriesPath<'_> {
        SeriesPath::new(self.host_key(), &self.topic, Some(&self.channel_name))
    }
}
