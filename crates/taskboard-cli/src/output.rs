//! JSON envelopes printed by every `taskboard` command.
//!
//! Results go to stdout as `{"success": true, "api_version", "data"}`,
//! failures to stderr as `{"success": false, "api_version", "error"}`.

use serde::Serialize;

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            api_version: API_VERSION,
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    fn failed(message: &str) -> Self {
        Self {
            success: false,
            api_version: API_VERSION,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

/// Boards, tasks and the like, with their number.
#[derive(Serialize)]
pub struct Listing<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

pub fn output_success<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(&Envelope::ok(data))?);
    Ok(())
}

pub fn output_list<T: Serialize>(items: Vec<T>) -> anyhow::Result<()> {
    output_success(Listing::from(items))
}

/// Report `message` on stderr and exit with status 1.
pub fn output_error(message: &str) -> ! {
    match serde_json::to_string(&Envelope::failed(message)) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{}", message),
    }
    std::process::exit(1);
}
