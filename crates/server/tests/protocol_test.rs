use parkspot_server::{Server, ServerConfig};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;

fn spawn_server(config: ServerConfig) -> anyhow::Result<SocketAddr> {
    tracing_subscriber::fmt::try_init().ok();
    let server = Server::bind(&config.with_host("127.0.0.1").with_port(0))?;
    let addr = server.local_addr()?;
    thread::spawn(move || server.run());
    Ok(addr)
}

fn roundtrip(addr: SocketAddr, raw: &str) -> anyhow::Result<String> {
    let mut stream = TcpStream::connect(addr)?;
    stream.write_all(raw.as_bytes())?;
    let mut response = String::new();
    stream.read_to_string(&mut response)?;
    Ok(response)
}

fn body(response: &str) -> &str {
    response
        .strip_prefix("HTTP/1.1 200 OK\r\n\r\n")
        .unwrap_or_else(|| panic!("unexpected response {response:?}"))
}

#[test]
fn test_demo_spots_query() -> anyhow::Result<()> {
    let addr = spawn_server(ServerConfig::default().with_demo_spots(true))?;
    let response = roundtrip(
        addr,
        "GET /37.34,-122.04,37.32,-122.02 HTTP/1.1\r\nHost: localhost\r\nAccept: */*\r\n\r\n",
    )?;

    let mut pairs: Vec<String> = body(&response)
        .split(',')
        .collect::<Vec<_>>()
        .chunks(2)
        .map(|pair| pair.join(","))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            "37.3276574,-122.0350399",
            "37.33182,-122.03118",
            "37.3349285,-122.011033",
        ]
    );
    Ok(())
}

#[test]
fn test_add_query_remove_cycle() -> anyhow::Result<()> {
    let addr = spawn_server(ServerConfig::default())?;

    let added = roundtrip(addr, "POST /ADD,10.0,20.0 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&added), "Success");

    let found = roundtrip(addr, "GET /11,19,9,21 HTTP/1.1\r\n\r\n")?;
    assert!(body(&found).contains("10.0,20.0"));

    let removed = roundtrip(addr, "POST /REMOVE,10.0,20.0 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&removed), "Success");

    let empty = roundtrip(addr, "GET /11,19,9,21 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&empty), "");
    Ok(())
}

#[test]
fn test_protocol_errors_keep_server_alive() -> anyhow::Result<()> {
    let addr = spawn_server(ServerConfig::default())?;

    let odd = roundtrip(addr, "GET /1,2,3 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&odd), "Invalid Get Request");

    let method = roundtrip(addr, "PUT /ADD,1,2 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&method), "Invalid request");

    let post = roundtrip(addr, "POST /ADD,1.0,nope HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&post), "Invalid Post Request");

    let unknown = roundtrip(addr, "POST /PARK,1.0,2.0 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&unknown), "Success");

    let still_empty = roundtrip(addr, "GET /90,-180,-90,180 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&still_empty), "");
    Ok(())
}

#[test]
fn test_client_disconnect_without_request() -> anyhow::Result<()> {
    let addr = spawn_server(ServerConfig::default())?;

    drop(TcpStream::connect(addr)?);

    let response = roundtrip(addr, "GET /1,2,3,4 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&response), "");
    Ok(())
}

#[test]
fn test_oversized_target_still_gets_a_response() -> anyhow::Result<()> {
    let addr = spawn_server(ServerConfig::default())?;

    let target = "1".repeat(10 * 1024);
    let response = roundtrip(
        addr,
        &format!("GET /{target} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
    )?;
    assert_eq!(body(&response), "Invalid Get Request");

    let next = roundtrip(addr, "GET /1,2,3,4 HTTP/1.1\r\n\r\n")?;
    assert_eq!(body(&next), "");
    Ok(())
}
