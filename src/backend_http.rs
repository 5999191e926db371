use std::{
    io::{Read, Write},
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use url::Url;

use crate::http_response;

const MAX_RESPONSE_HEAD_BYTES: usize = 8 * 1024;

fn build_get_request(url: &Url) -> Result<String, String> {
    let host = url
        .host_str()
        .ok_or_else(|| format!("Backend URL has no host: {url}"))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| format!("Backend URL has no port: {url}"))?;
    let mut path = url.path().to_string();
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }

    Ok(format!(
        "GET {path} HTTP/1.1\r\nHost: {host}:{port}\r\nAccept: */*\r\nConnection: close\r\n\r\n"
    ))
}

fn read_response_head(stream: &mut TcpStream) -> Result<String, String> {
    let mut head = Vec::with_capacity(512);
    let mut buffer = [0_u8; 512];
    loop {
        let read = stream
            .read(&mut buffer)
            .map_err(|error| format!("Failed to read backend response: {error}"))?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&buffer[..read]);
        if head.windows(4).any(|window| window == b"\r\n\r\n")
            || head.len() >= MAX_RESPONSE_HEAD_BYTES
        {
            break;
        }
    }

    if head.is_empty() {
        return Err("Backend closed the connection without a response.".to_string());
    }
    Ok(String::from_utf8_lossy(&head).into_owned())
}

/// Issues a GET against `url` and returns the response status code.
pub(crate) fn request_backend_status(url: &Url, timeout: Duration) -> Result<u16, String> {
    let host = url
        .host_str()
        .ok_or_else(|| format!("Backend URL has no host: {url}"))?;
    let port = url.port_or_known_default().unwrap_or(80);
    let addrs = (host, port)
        .to_socket_addrs()
        .map_err(|error| format!("Failed to resolve backend address {host}:{port}: {error}"))?
        .collect::<Vec<_>>();

    let mut last_error = format!("No addresses resolved for {host}:{port}");
    for address in addrs {
        let mut stream = match TcpStream::connect_timeout(&address, timeout) {
            Ok(stream) => stream,
            Err(error) => {
                last_error = format!("Failed to connect to backend {address}: {error}");
                continue;
            }
        };
        stream
            .set_read_timeout(Some(timeout))
            .and_then(|_| stream.set_write_timeout(Some(timeout)))
            .map_err(|error| format!("Failed to configure backend socket: {error}"))?;

        let request = build_get_request(url)?;
        stream
            .write_all(request.as_bytes())
            .map_err(|error| format!("Failed to send backend health request: {error}"))?;

        let head = read_response_head(&mut stream)?;
        return http_response::parse_status_code(&head)
            .ok_or_else(|| "Backend returned a malformed status line.".to_string());
    }

    Err(last_error)
}
