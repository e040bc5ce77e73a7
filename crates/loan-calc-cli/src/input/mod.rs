pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Read a typed request from `--input <file.json>`, or from JSON piped on
/// stdin. Returns `None` when neither source supplied anything.
pub fn read_request<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
