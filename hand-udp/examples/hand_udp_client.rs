use clap::Parser;
use sawscope_hand_udp::{Datagram, HandUdpClient};

/// Sends a single hand position to a running synthesizer, eg. to test the listener without a
/// camera.
#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long, default_value = "127.0.0.1:5005")]
    server: String,
    #[arg(short)]
    x: i32,
    #[arg(short)]
    y: i32,
    /// Leave out to keep the synthesizer's current pinch state.
    #[arg(short, long)]
    pinch: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let client = HandUdpClient::new(args.server)?;
    client.send(&Datagram {
        x: args.x,
        y: args.y,
        pinch: args.pinch,
    })
}
