pub(crate) fn parse_status_code(response_head: &str) -> Option<u16> {
    let status_line = response_head.lines().next()?.trim();
    let mut parts = status_line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }

    let code = parts.next()?;
    if code.len() != 3 {
        return None;
    }
    code.parse::<u16>().ok()
}

pub(crate) fn is_ready_status(status: u16) -> bool {
    status == 200
}
