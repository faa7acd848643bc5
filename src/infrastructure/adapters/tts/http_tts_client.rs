//! HTTP TTS Client - 调用 Google Translate TTS 接口
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 TTS API:
//! GET {base_url}/translate_tts?ie=UTF-8&client=tw-ob&tl=en&q=...&ttsspeed=1
//! Response: audio/mpeg binary
//!
//! 单次请求的文本长度有上限，长文本按空白切分为多段，返回的 MP3 帧按顺序拼接。

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisRequest, SynthesisResponse, TtsError,
};

/// 单次请求最大字符数
pub const MAX_CHARS_PER_REQUEST: usize = 100;

/// 重试间隔，按尝试次数线性增长
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 重试次数（仅网络错误和超时）
    pub max_retries: u32,
    /// 慢速朗读
    pub slow: bool,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            timeout_secs: 30,
            max_retries: 0,
            slow: false,
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.base_url.trim_end_matches('/'))
    }

    fn speed(&self) -> &'static str {
        if self.config.slow {
            "0.3"
        } else {
            "1"
        }
    }

    /// 请求一段文本（不超过单次上限）
    async fn fetch_chunk(&self, chunk: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        let response = self
            .client
            .get(self.tts_url())
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("q", chunk),
                ("ttsspeed", self.speed()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status,
                error_text.chars().take(200).collect::<String>()
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;
        if audio.is_empty() {
            return Err(TtsError::InvalidResponse("Empty audio body".to_string()));
        }
        Ok(audio.to_vec())
    }

    /// 带重试的单段请求
    async fn fetch_with_retry(&self, chunk: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        let mut attempt = 0;
        loop {
            match self.fetch_chunk(chunk, lang).await {
                Ok(audio) => return Ok(audio),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(attempt = attempt, error = %e, "TTS request failed, retrying");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for HttpTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(TtsError::EmptyText);
        }
        let lang = service_language(&request.language)?;
        let chunks = split_text(text, MAX_CHARS_PER_REQUEST);

        tracing::debug!(
            url = %self.tts_url(),
            text_len = text.len(),
            chunks = chunks.len(),
            lang = %lang,
            "Sending TTS request"
        );

        let mut audio_data = Vec::new();
        for chunk in &chunks {
            audio_data.extend(self.fetch_with_retry(chunk, &lang).await?);
        }

        Ok(SynthesisResponse {
            audio_data,
            requests: chunks.len(),
        })
    }
}

/// 校验语言标签并转换为服务端 `tl` 参数
///
/// 英语地区变体（en-us、en-gb ...）统一为 `en`，其余保留地区部分（zh-CN）
pub fn service_language(tag: &str) -> Result<String, TtsError> {
    let tag = tag.trim();
    let valid = (2..=10).contains(&tag.len())
        && tag
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '-' || c == '_');
    let mut parts = tag.split(['-', '_']);
    let primary = parts.next().unwrap_or_default().to_ascii_lowercase();
    if !valid || !(2..=3).contains(&primary.len()) {
        return Err(TtsError::UnsupportedLanguage(tag.to_string()));
    }

    match parts.next() {
        None => Ok(primary),
        Some("") => Err(TtsError::UnsupportedLanguage(tag.to_string())),
        Some(_) if primary == "en" => Ok(primary),
        Some(region) => Ok(format!("{}-{}", primary, region.to_ascii_uppercase())),
    }
}

/// 按空白把文本切成不超过 `max_chars` 个字符的片段
///
/// 超长单词按字符硬切
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// 本地假 TTS 服务：按顺序回放响应，`None` 表示读完请求后直接断开
    ///
    /// 返回基础 URL 和收到的请求行
    async fn serve(replies: Vec<Option<(u16, &'static str)>>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        tokio::spawn(async move {
            for reply in replies {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let head = read_head(&mut socket).await;
                let line = head.lines().next().unwrap_or_default().to_string();
                seen.lock().unwrap().push(line);

                if let Some((status, body)) = reply {
                    let response = format!(
                        "HTTP/1.1 {} Test\r\nContent-Type: audio/mpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
            }
        });

        (format!("http://{}", addr), requests)
    }

    async fn read_head(socket: &mut TcpStream) -> String {
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
        String::from_utf8_lossy(&head).into_owned()
    }

    fn client_for(base_url: &str, max_retries: u32) -> HttpTtsClient {
        HttpTtsClient::new(HttpTtsClientConfig {
            max_retries,
            ..HttpTtsClientConfig::new(base_url)
        })
        .unwrap()
    }

    fn request(text: &str) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_string(),
            language: "en-us".to_string(),
        }
    }

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert_eq!(config.base_url, "https://translate.google.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.slow);
    }

    #[test]
    fn test_config_new_keeps_defaults() {
        let config = HttpTtsClientConfig::new("http://example.com:9000");
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_tts_url_trims_trailing_slash() {
        let client = HttpTtsClient::new(HttpTtsClientConfig::new("http://tts.local/")).unwrap();
        assert_eq!(client.tts_url(), "http://tts.local/translate_tts");
    }

    #[test]
    fn test_service_language() {
        assert_eq!(service_language("en-us").unwrap(), "en");
        assert_eq!(service_language("EN_GB").unwrap(), "en");
        assert_eq!(service_language("fr").unwrap(), "fr");
        assert_eq!(service_language("zh-cn").unwrap(), "zh-CN");
    }

    #[test]
    fn test_invalid_language_tags() {
        for tag in ["", "e", "en us", "12", "english-language", "en-"] {
            assert!(
                matches!(service_language(tag), Err(TtsError::UnsupportedLanguage(_))),
                "tag {:?} should be rejected",
                tag
            );
        }
    }

    #[test]
    fn test_split_short_text_single_chunk() {
        assert_eq!(split_text("Hello there.", 100), vec!["Hello there."]);
    }

    #[test]
    fn test_split_respects_limit_and_words() {
        let text = "one two three four five";
        let chunks = split_text(text, 9);
        assert_eq!(chunks, vec!["one two", "three", "four five"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 9));
    }

    #[test]
    fn test_split_hard_splits_long_word() {
        let chunks = split_text("abcdefghij xy", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_request() {
        let client = HttpTtsClient::new(HttpTtsClientConfig::new("http://127.0.0.1:9")).unwrap();
        let result = client
            .synthesize(SynthesisRequest {
                text: "   ".to_string(),
                language: "en-us".to_string(),
            })
            .await;
        assert!(matches!(result, Err(TtsError::EmptyText)));
    }

    #[tokio::test]
    async fn test_unsupported_language_rejected_before_request() {
        let client = HttpTtsClient::new(HttpTtsClientConfig::new("http://127.0.0.1:9")).unwrap();
        let result = client
            .synthesize(SynthesisRequest {
                text: "Hello".to_string(),
                language: "not a tag".to_string(),
            })
            .await;
        assert!(matches!(result, Err(TtsError::UnsupportedLanguage(_))));
    }

    #[tokio::test]
    async fn test_dropped_connection_is_retried() {
        let (url, requests) = serve(vec![None, Some((200, "audio"))]).await;
        let client = client_for(&url, 1);

        let response = client.synthesize(request("Hello.")).await.unwrap();

        assert_eq!(response.audio_data, b"audio");
        assert_eq!(response.requests, 1);
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_network_error_without_retries_fails_once() {
        let (url, requests) = serve(vec![None, Some((200, "audio"))]).await;
        let client = client_for(&url, 0);

        let result = client.synthesize(request("Hello.")).await;

        assert!(matches!(result, Err(TtsError::NetworkError(_))));
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_service_error_is_not_retried() {
        let (url, requests) = serve(vec![Some((500, "boom")), Some((200, "audio"))]).await;
        let client = client_for(&url, 2);

        let result = client.synthesize(request("Hello.")).await;

        match result {
            Err(TtsError::ServiceError(message)) => assert!(message.contains("500")),
            other => panic!("unexpected result: {:?}", other.map(|r| r.requests)),
        }
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_long_sentence_is_split_and_joined_in_order() {
        let (url, requests) = serve(vec![Some((200, "part1")), Some((200, "part2"))]).await;
        let client = client_for(&url, 0);
        let text = format!("{} {}", ["alpha"; 16].join(" "), ["omega"; 14].join(" "));

        let response = client.synthesize(request(&text)).await.unwrap();

        assert_eq!(response.requests, 2);
        assert_eq!(response.audio_data, b"part1part2");
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("GET /translate_tts?"));
        assert!(requests[0].contains("q=alpha"));
        assert!(requests[1].contains("q=omega"));
        assert!(requests.iter().all(|r| r.contains("tl=en&")));
    }
}
