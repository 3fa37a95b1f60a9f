use serde::{Deserialize, Serialize};
use std::fmt;

/// 执行器类别，决定请求由哪个执行器处理
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExecutorCategory {
    #[serde(rename = "WORKER")]
    Worker,
    #[serde(rename = "CLIENT")]
    Client,
}

impl ExecutorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutorCategory::Worker => "WORKER",
            ExecutorCategory::Client => "CLIENT",
        }
    }

    pub fn all() -> [ExecutorCategory; 2] {
        [ExecutorCategory::Worker, ExecutorCategory::Client]
    }
}

impl fmt::Display for ExecutorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 目标节点地址，空地址表示"未解析/无可用节点"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Host {
    pub address: String,
}

impl Host {
    pub fn new<S: Into<String>>(address: S) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn of<S: Into<String>>(ip: S, port: u16) -> Self {
        Self {
            address: format!("{}:{}", ip.into(), port),
        }
    }

    pub fn empty() -> Self {
        Self {
            address: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
    }

    pub fn ip(&self) -> Option<&str> {
        self.address.split(':').next().filter(|s| !s.is_empty())
    }

    pub fn port(&self) -> Option<u16> {
        self.address.split(':').nth(1)?.parse().ok()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}
