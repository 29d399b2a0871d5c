use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Minimal HTTP server for product pages.
///
/// Each path answers from a queue of `(status, body)` responses; the last
/// response repeats once the queue is down to one. Unknown paths get 404.
/// Connections are closed after every response.
pub struct PageServer {
    addr: SocketAddr,
    hits: Arc<Mutex<Vec<String>>>,
}

type Routes = HashMap<String, Vec<(u16, String)>>;

impl PageServer {
    pub fn start(routes: Vec<(&str, Vec<(u16, String)>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind page server");
        let addr = listener.local_addr().expect("local addr");
        let routes: Routes = routes
            .into_iter()
            .map(|(path, responses)| (path.to_string(), responses))
            .collect();
        let routes = Arc::new(Mutex::new(routes));
        let hits = Arc::new(Mutex::new(Vec::new()));

        let served_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                serve(stream, &routes, &served_hits);
            }
        });

        Self { addr, hits }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// Number of requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits
            .lock()
            .expect("hits lock")
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }
}

fn serve(mut stream: TcpStream, routes: &Mutex<Routes>, hits: &Mutex<Vec<String>>) {
    let mut request = Vec::new();
    let mut buf = [0_u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    hits.lock().expect("hits lock").push(path.clone());

    let (status, body) = {
        let mut routes = routes.lock().expect("routes lock");
        match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => (404, "not found".to_string()),
        }
    };

    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        410 => "Gone",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// A product page in the layout the Amazon scraper understands.
pub fn product_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><head><title>Amazon.com: {title}</title></head><body>
<span id="productTitle"> {title} </span>
<span class="a-price"><span class="a-offscreen">{price}</span></span>
<div id="availability"><span>In Stock</span></div>
</body></html>"#
    )
}

/// A robot check interstitial.
pub fn captcha_page() -> String {
    r#"<html><head><title>Robot Check</title></head><body>
<form action="/errors/validateCaptcha"><input id="captchacharacters"></form>
</body></html>"#
        .to_string()
}
