use anyhow::Result;
use domain_directory::core::WhoisTransport;
use domain_directory::{DirectoryError, TcpWhoisTransport, WhoisResolver};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 依序接受連線，每條連線讀取一行查詢後回覆預設內容並關閉
fn spawn_fake_whois(listener: TcpListener, responses: Vec<String>) -> JoinHandle<Vec<String>> {
    tokio::spawn(async move {
        let mut queries = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 256];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                if received.ends_with(b"\r\n") {
                    break;
                }
            }
            queries.push(String::from_utf8(received).unwrap());
            socket.write_all(response.as_bytes()).await.unwrap();
        }
        queries
    })
}

#[tokio::test]
async fn test_two_hop_lookup_over_tcp() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    let server = spawn_fake_whois(
        listener,
        vec![
            "% IANA WHOIS server\nrefer:        127.0.0.1\n\nwhois:        127.0.0.1\n".to_string(),
            "Domain Name: EXAMPLE.COM\r\nCreation Date: 1995-08-14T04:00:00Z\r\nRegistry Expiry Date: 2025-08-13T04:00:00Z\r\nName Server: A.IANA-SERVERS.NET\r\nName Server: B.IANA-SERVERS.NET\r\n".to_string(),
        ],
    );

    let transport = TcpWhoisTransport::new(port, Duration::from_secs(2));
    let resolver = WhoisResolver::new(transport, "127.0.0.1");
    let record = resolver.resolve("example.com").await;

    assert_eq!(record.domain, "example.com");
    assert_eq!(record.registration_date, "1995-08-14T04:00:00Z");
    assert_eq!(record.expiration_date, "2025-08-13T04:00:00Z");
    assert_eq!(record.name_server, "A.IANA-SERVERS.NET,B.IANA-SERVERS.NET");

    let queries = server.await?;
    assert_eq!(queries, vec!["example.com\r\n", "example.com\r\n"]);
    Ok(())
}

#[tokio::test]
async fn test_silent_server_times_out() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    // 接受連線但從不回覆
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        drop(socket);
    });

    let transport = TcpWhoisTransport::new(port, Duration::from_millis(200));
    let result = transport.query("127.0.0.1", "slow.com").await;

    assert!(matches!(result, Err(DirectoryError::TimeoutError { .. })));
    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_refused_connection_is_network_error() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let transport = TcpWhoisTransport::new(port, Duration::from_secs(2));
    let result = transport.query("127.0.0.1", "closed.com").await;

    assert!(matches!(result, Err(DirectoryError::NetworkError { .. })));
    Ok(())
}

#[tokio::test]
async fn test_resolver_degrades_to_empty_fields_on_timeout() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        drop(socket);
    });

    let transport = TcpWhoisTransport::new(port, Duration::from_millis(200));
    let resolver = WhoisResolver::new(transport, "127.0.0.1");
    let record = resolver.resolve("offline.com").await;

    assert_eq!(record.domain, "offline.com");
    assert!(!record.timestamp.is_empty());
    assert_eq!(record.registration_date, "");
    assert_eq!(record.expiration_date, "");
    assert_eq!(record.name_server, "");
    server.abort();
    Ok(())
}
