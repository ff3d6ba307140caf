use crate::datagram::Datagram;
use std::net::{Ipv4Addr, ToSocketAddrs, UdpSocket};

/// Fingertips closer together than this, in normalized camera coordinates, count as a pinch.
pub const PINCH_THRESHOLD: f32 = 0.07;

/// Fingertip positions reported by a hand tracker, normalized so that (0, 0) is the top left of
/// the camera image and (1, 1) is the bottom right.
#[derive(Debug, Clone, Copy)]
pub struct HandLandmarks {
    pub index_tip: (f32, f32),
    pub thumb_tip: (f32, f32),
}

impl HandLandmarks {
    /// The index fingertip scaled to window pixels, pinching if the thumb is touching it.
    pub fn to_datagram(&self, width_px: u32, height_px: u32) -> Datagram {
        let (x, y) = self.index_tip;
        let (thumb_x, thumb_y) = self.thumb_tip;
        let pinch_dist = ((x - thumb_x).powi(2) + (y - thumb_y).powi(2)).sqrt();
        Datagram {
            x: (x * width_px as f32) as i32,
            y: (y * height_px as f32) as i32,
            pinch: Some(pinch_dist < PINCH_THRESHOLD),
        }
    }
}

/// Sends hand positions to a synthesizer. This is the sending half of `HandUdpListener`.
pub struct HandUdpClient {
    socket: UdpSocket,
}

impl HandUdpClient {
    pub fn new<A: ToSocketAddrs>(addrs: A) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect(addrs)?;
        Ok(Self { socket })
    }

    pub fn send(&self, datagram: &Datagram) -> anyhow::Result<()> {
        self.send_raw(datagram.to_string().as_bytes())
    }

    pub fn send_landmarks(
        &self,
        landmarks: &HandLandmarks,
        width_px: u32,
        height_px: u32,
    ) -> anyhow::Result<()> {
        self.send(&landmarks.to_datagram(width_px, height_px))
    }

    pub fn send_raw(&self, buf: &[u8]) -> anyhow::Result<()> {
        self.socket.send(buf)?;
        Ok(())
    }
}
