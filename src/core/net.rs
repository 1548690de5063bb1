// src/core/net.rs
// Very minimal HTTP GET over plain TCP, no TLS.
// Uses HTTP/1.0 so the server closes the connection at the end (no chunked
// transfer). Page retrieval sits outside the scrape core; tests and offline
// runs inject documents through scrape::PageSource instead.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

const TIMEOUT_SECS: u64 = 15;

/// Perform a plain HTTP GET request and return the response body as a String.
///
/// * `host` – hostname (no protocol, no port)
/// * `port` – usually 80 for HTTP
/// * `path` – path + query string starting with `/`
///
/// Anything but a 200 is an error, redirects included: the caller treats a
/// failed page like a page without the actions table, and a redirect body
/// would otherwise parse as an empty page. The Location target is included
/// so the log shows where the site wanted to go.
pub fn http_get(host: &str, port: u16, path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect((host, port))?;
    stream.set_read_timeout(Some(Duration::from_secs(TIMEOUT_SECS)))?;
    stream.set_write_timeout(Some(Duration::from_secs(TIMEOUT_SECS)))?;

    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: iam_scrape/0.3\r\nConnection: close\r\n\r\n",
        path, host
    );
    stream.write_all(req.as_bytes())?;
    stream.flush()?;

    // Read the entire response; HTTP/1.0 + Connection: close means EOF is
    // end-of-body.
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let header_end = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")?;
    let (head, body) = resp.split_at(header_end + 4);
    let status = head.lines().next().unwrap_or("");

    if !status.contains("200") {
        if let Some(location) = header_value(head, "location") {
            return Err(format!("HTTP error: {status} -> {location}").into());
        }
        return Err(format!("HTTP error: {status}").into());
    }

    Ok(body.to_string())
}

fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.eq_ignore_ascii_case(name).then(|| value.trim())
    })
}
