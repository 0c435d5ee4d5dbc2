/// Access log line: peer, request line, status, size and latency.
pub fn logger_format() -> &'static str {
    "[ApiRestServer] %a \"%r\" %s %b %Dms"
}
