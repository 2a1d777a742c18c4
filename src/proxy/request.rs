//! Request line reading and parsing.
//!
//! Only the first line of the client stream is ever read. Headers that follow
//! it are left unconsumed.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::{RelayError, RelayResult};

/// The method and raw target from a client's request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    method: String,
    target: String,
}

impl IncomingRequest {
    /// Split `line` on single spaces and take the first two tokens.
    ///
    /// Trailing empty tokens are discarded, so `"GET "` is one token. Inner
    /// empty tokens are kept: `"GET  http://x"` has an empty target.
    pub fn parse(line: &str) -> RelayResult<Self> {
        let mut tokens: Vec<&str> = line.split(' ').collect();
        while tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }

        match tokens.as_slice() {
            [method, target, ..] => Ok(Self {
                method: (*method).to_string(),
                target: (*target).to_string(),
            }),
            _ => Err(RelayError::MalformedRequestLine {
                line: line.to_string(),
            }),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Read one line from the client, without its terminator.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. After a `\r` the stream is
/// not read again, so a following `\n` stays buffered with the headers.
/// Returns `None` if the client closed the stream before sending anything. A
/// final line with no terminator is still returned. Invalid UTF-8 is replaced.
pub async fn read_request_line<R>(reader: &mut R) -> RelayResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let mut terminated = false;

    while !terminated {
        let available = reader.fill_buf().await.map_err(RelayError::ClientIo)?;
        if available.is_empty() {
            if line.is_empty() {
                return Ok(None);
            }
            break;
        }

        let used = match available.iter().position(|b| matches!(b, b'\n' | b'\r')) {
            Some(i) => {
                line.extend_from_slice(&available[..i]);
                terminated = true;
                i + 1
            }
            None => {
                line.extend_from_slice(available);
                available.len()
            }
        };
        reader.consume(used);
    }

    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_method_and_target() {
        let request = IncomingRequest::parse("GET http://example.com/ HTTP/1.1").unwrap();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "http://example.com/");
    }

    #[test]
    fn two_tokens_are_enough() {
        let request = IncomingRequest::parse("POST ftp://h/f").unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.target(), "ftp://h/f");
    }

    #[test]
    fn single_token_is_malformed() {
        for line in ["GET", "GET ", "", "   "] {
            let err = IncomingRequest::parse(line).unwrap_err();
            assert!(matches!(err, RelayError::MalformedRequestLine { .. }), "{line:?}");
        }
    }

    #[test]
    fn double_space_gives_empty_target() {
        let request = IncomingRequest::parse("GET  http://x HTTP/1.1").unwrap();
        assert_eq!(request.target(), "");
    }

    #[tokio::test]
    async fn reads_first_line_only() {
        let mut input: &[u8] = b"GET http://a/ HTTP/1.1\r\nHost: a\r\n\r\n";
        let line = read_request_line(&mut input).await.unwrap();
        assert_eq!(line.as_deref(), Some("GET http://a/ HTTP/1.1"));
        assert_eq!(input, b"\nHost: a\r\n\r\n");
    }

    #[tokio::test]
    async fn immediate_eof_is_none() {
        let mut input: &[u8] = b"";
        assert_eq!(read_request_line(&mut input).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unterminated_line_is_returned() {
        let mut input: &[u8] = b"GET gopher://x";
        let line = read_request_line(&mut input).await.unwrap();
        assert_eq!(line.as_deref(), Some("GET gopher://x"));
    }

    #[tokio::test]
    async fn bare_newline_is_empty_line() {
        let mut input: &[u8] = b"\n";
        let line = read_request_line(&mut input).await.unwrap();
        assert_eq!(line.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn lone_carriage_return_ends_line() {
        let mut input: &[u8] = b"GET ftp://h/p\rHost: h";
        let line = read_request_line(&mut input).await.unwrap();
        assert_eq!(line.as_deref(), Some("GET ftp://h/p"));
        assert_eq!(input, b"Host: h");
    }

    #[tokio::test]
    async fn line_split_across_reads() {
        let (mut client, server) = tokio::io::duplex(4);
        let mut reader = tokio::io::BufReader::new(server);
        let writer = tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            client.write_all(b"GET gopher://long/target\n").await.unwrap();
            client
        });

        let line = read_request_line(&mut reader).await.unwrap();
        assert_eq!(line.as_deref(), Some("GET gopher://long/target"));
        writer.await.unwrap();
    }
}
