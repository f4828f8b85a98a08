use parkspot::{Coordinate, IndexConfig};
use parkspot_client::{ClientError, ParkingClient};
use parkspot_server::{Method, Server, ServerConfig};
use std::thread;
use std::time::Duration;

fn start(config: ServerConfig) -> anyhow::Result<ParkingClient> {
    tracing_subscriber::fmt::try_init().ok();
    let server = Server::bind(&config.with_host("127.0.0.1").with_port(0))?;
    let addr = server.local_addr()?;
    thread::spawn(move || server.run());
    Ok(ParkingClient::new(addr).with_timeout(Some(Duration::from_secs(10))))
}

#[test]
fn test_client_lifecycle() -> anyhow::Result<()> {
    let client = start(ServerConfig::default())?;

    let spots = [Coordinate::new(10.0, 20.0), Coordinate::new(10.5, 20.5)];
    client.add(&spots)?;

    let mut found = client.query(Coordinate::new(11.0, 19.0), Coordinate::new(9.0, 21.0))?;
    found.sort_by(|a, b| a.lat().total_cmp(&b.lat()));
    assert_eq!(found, spots);

    client.remove(&[Coordinate::new(10.0, 20.0)])?;
    let found = client.query(Coordinate::new(11.0, 19.0), Coordinate::new(9.0, 21.0))?;
    assert_eq!(found, vec![Coordinate::new(10.5, 20.5)]);
    Ok(())
}

#[test]
fn test_exact_tolerance_from_config() -> anyhow::Result<()> {
    let config = ServerConfig::default()
        .with_index(IndexConfig::default().with_query_tolerance(0.0))
        .with_initial_spots(vec![Coordinate::new(10.0, 20.0), Coordinate::new(12.0, 20.0)]);
    let client = start(config)?;

    let found = client.query(Coordinate::new(11.0, 19.0), Coordinate::new(9.0, 21.0))?;
    assert_eq!(found, vec![Coordinate::new(10.0, 20.0)]);
    Ok(())
}

#[test]
fn test_rejected_requests() -> anyhow::Result<()> {
    let client = start(ServerConfig::default())?;

    assert_eq!(client.send(Method::Get, "1,2,3")?, "Invalid Get Request");

    let err = client
        .query(Coordinate::new(f64::NAN, 0.0), Coordinate::new(1.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, ClientError::Rejected(_)));

    let err = client.add(&[Coordinate::new(f64::INFINITY, 1.0)]).unwrap_err();
    assert!(matches!(err, ClientError::Rejected(_)));

    assert_eq!(client.send(Method::Invalid, "ADD,1.0,2.0")?, "Invalid request");
    Ok(())
}
