use super::*;

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// One-shot HTTP server: answers a single request with the given status
/// and JSON body, and hands the raw request back for inspection.
fn spawn_server(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut tmp = [0u8; 4096];
        let header_end = loop {
            let n = stream.read(&mut tmp).unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&tmp[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let content_length = String::from_utf8_lossy(&buf[..header_end])
            .to_ascii_lowercase()
            .lines()
            .find_map(|l| l.strip_prefix("content-length:").map(|v| v.trim().to_owned()))
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = stream.read(&mut tmp).unwrap();
            assert!(n > 0, "client closed before sending the body");
            buf.extend_from_slice(&tmp[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    });
    (addr, handle)
}

fn local_summarizer(addr: &str) -> GeminiSummarizer {
    GeminiSummarizer::new("test-key")
        .unwrap()
        .with_base_url(format!("http://{addr}"))
        .with_model("test-model")
}

#[test]
fn summarize_posts_the_prompt_and_returns_trimmed_text() {
    let (addr, handle) = spawn_server(
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[{"text":"  ছোট উক্তি "}]}}]}"#,
    );
    let out = local_summarizer(&addr).summarize("লম্বা বক্তৃতার লেখা").unwrap();
    assert_eq!(out, "ছোট উক্তি");

    let request = handle.join().unwrap();
    assert!(request.starts_with("POST /models/test-model:generateContent"));
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(request.contains("Extracted Quote:"));
    assert!(request.contains("লম্বা বক্তৃতার লেখা"));
}

#[test]
fn non_success_status_collapses_to_a_summarization_error() {
    let (addr, handle) = spawn_server("500 Internal Server Error", "{}");
    let err = local_summarizer(&addr).summarize("লেখা").unwrap_err();
    assert!(matches!(err, DesignError::Summarization(_)));
    handle.join().unwrap();
}

#[test]
fn empty_candidates_collapse_to_a_summarization_error() {
    let (addr, handle) = spawn_server("200 OK", r#"{"candidates":[]}"#);
    let err = local_summarizer(&addr).summarize("লেখা").unwrap_err();
    assert!(matches!(err, DesignError::Summarization(_)));
    handle.join().unwrap();
}

#[test]
fn blank_candidate_text_counts_as_no_text() {
    let (addr, handle) = spawn_server(
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#,
    );
    let err = local_summarizer(&addr).summarize("লেখা").unwrap_err();
    assert!(matches!(err, DesignError::Summarization(_)));
    handle.join().unwrap();
}

#[test]
fn prompt_carries_the_extraction_instructions() {
    let prompt = build_prompt("দীর্ঘ বক্তৃতা");
    assert!(prompt.starts_with("From the following Bengali text"));
    assert!(prompt.contains("ideally between 10 to 20 words"));
    assert!(prompt.contains("Do not add any extra text, formatting, or quotation marks"));
    assert!(prompt.contains("Text: \"দীর্ঘ বক্তৃতা\""));
    assert!(prompt.ends_with("Extracted Quote:"));
}

#[test]
fn request_wire_shape_matches_the_api() {
    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: "hello".to_owned(),
            }],
        }],
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]})
    );
}

#[test]
fn response_parsing_tolerates_extra_fields_and_absence() {
    let parsed: GenerateContentResponse = serde_json::from_str(
        r#"{"candidates":[{"content":{"parts":[{"text":"a"}]},"finishReason":"STOP"}],"modelVersion":"x"}"#,
    )
    .unwrap();
    assert_eq!(parsed.candidates[0].content.parts[0].text, "a");

    let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert!(empty.candidates.is_empty());
}

#[test]
fn empty_api_key_is_rejected_up_front() {
    assert!(GeminiSummarizer::new("   ").is_err());
}
