use crate::{
    datagram::{Datagram, parse_datagram},
    position::HandPosition,
};
use std::{
    io,
    net::{SocketAddr, ToSocketAddrs, UdpSocket},
    sync::Arc,
    thread,
};

pub const DEFAULT_PORT: u16 = 5005;

// Hand positions are a few short numbers. Longer datagrams are truncated to this size.
const BUF_SIZE: usize = 64;

/// Receives hand positions from a hand tracking process over UDP.
pub struct HandUdpListener {
    socket: UdpSocket,
    buf_raw: [u8; BUF_SIZE],
}

impl HandUdpListener {
    /// Binds the socket immediately so that a port which is already in use is reported to the
    /// caller rather than failing silently on the listener thread.
    pub fn bind<A: ToSocketAddrs>(addrs: A) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind(addrs)?;
        Ok(Self {
            socket,
            buf_raw: [0; BUF_SIZE],
        })
    }

    pub fn local_socket_address(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Blocks until a datagram arrives. Returns `None` if it couldn't be parsed.
    pub fn recv_datagram(&mut self) -> Result<Option<Datagram>, io::Error> {
        let size = self.socket.recv(&mut self.buf_raw)?;
        let datagram = parse_datagram(&self.buf_raw[..size]);
        if datagram.is_none() {
            log::debug!(
                "Ignoring malformed hand position: {:?}",
                String::from_utf8_lossy(&self.buf_raw[..size])
            );
        }
        Ok(datagram)
    }

    /// Receives datagrams forever, storing each valid position in `position`.
    pub fn run(mut self, position: &HandPosition) {
        loop {
            match self.recv_datagram() {
                Ok(Some(datagram)) => position.apply(&datagram),
                Ok(None) => (),
                Err(e) => {
                    log::warn!("IO error reading from UDP socket: {e}");
                }
            }
        }
    }

    /// Runs the listener on a background thread. The thread is never joined; it keeps blocking
    /// on the socket until the process exits.
    pub fn spawn(self, position: Arc<HandPosition>) -> anyhow::Result<()> {
        let address = self.local_socket_address()?;
        thread::Builder::new()
            .name("hand-udp".to_string())
            .spawn(move || self.run(&position))?;
        log::info!("listening for hand positions on {}", address);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::HandUdpClient;
    use std::{
        net::Ipv4Addr,
        time::{Duration, Instant},
    };

    fn loopback_listener() -> HandUdpListener {
        HandUdpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap()
    }

    #[test]
    fn receives_from_client() {
        let mut listener = loopback_listener();
        let client =
            HandUdpClient::new(listener.local_socket_address().unwrap())
                .unwrap();
        let datagram = Datagram {
            x: 320,
            y: 240,
            pinch: Some(true),
        };
        client.send(&datagram).unwrap();
        assert_eq!(listener.recv_datagram().unwrap(), Some(datagram));
    }

    #[test]
    fn landmarks_arrive_as_window_pixels() {
        let mut listener = loopback_listener();
        let client =
            HandUdpClient::new(listener.local_socket_address().unwrap())
                .unwrap();
        let landmarks = crate::client::HandLandmarks {
            index_tip: (0.25, 0.5),
            thumb_tip: (0.26, 0.51),
        };
        client.send_landmarks(&landmarks, 1000, 600).unwrap();
        assert_eq!(
            listener.recv_datagram().unwrap(),
            Some(Datagram {
                x: 250,
                y: 300,
                pinch: Some(true)
            })
        );
    }

    #[test]
    fn malformed_datagram_is_not_an_error() {
        let mut listener = loopback_listener();
        let client =
            HandUdpClient::new(listener.local_socket_address().unwrap())
                .unwrap();
        client.send_raw(b"abc").unwrap();
        assert_eq!(listener.recv_datagram().unwrap(), None);
    }

    #[test]
    fn over_long_datagram_is_truncated_to_buffer() {
        let mut listener = loopback_listener();
        let client =
            HandUdpClient::new(listener.local_socket_address().unwrap())
                .unwrap();
        let mut payload = b"1,2,1".to_vec();
        payload.resize(200, b' ');
        client.send_raw(&payload).unwrap();
        assert_eq!(
            listener.recv_datagram().unwrap(),
            Some(Datagram {
                x: 1,
                y: 2,
                pinch: Some(true)
            })
        );
    }

    #[test]
    fn binding_a_taken_port_fails() {
        let listener = loopback_listener();
        let address = listener.local_socket_address().unwrap();
        assert!(HandUdpListener::bind(address).is_err());
    }

    #[test]
    fn background_thread_updates_shared_position() {
        let listener = loopback_listener();
        let client =
            HandUdpClient::new(listener.local_socket_address().unwrap())
                .unwrap();
        let position = Arc::new(HandPosition::new());
        listener.spawn(Arc::clone(&position)).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        // UDP on loopback is reliable in practice, but resend until seen rather than assume.
        while (position.x(), position.y()) != (17, 23) {
            assert!(Instant::now() < deadline, "position was never updated");
            client
                .send(&Datagram {
                    x: 17,
                    y: 23,
                    pinch: None,
                })
                .unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        assert!(!position.pinch());
    }
}
