use std::time::Duration;

use crate::foundation::error::LessonResult;
use crate::widget::contract::{Interaction, Visualization};
use crate::widget::sequence::StagedSequence;

/// Registry key.
pub const KEY: &str = "request-flow-visualizer";

/// Time spent in each phase before moving on.
pub const PHASE_DELAY: Duration = Duration::from_millis(1500);

/// One step of a browser-to-server round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPhase {
    /// Nothing in flight.
    Idle,
    /// Resolving the host name.
    DnsLookup,
    /// Opening the TCP connection.
    TcpHandshake,
    /// Negotiating TLS.
    TlsHandshake,
    /// Request line and headers on the wire.
    RequestSent,
    /// Server builds the response.
    ServerProcessing,
    /// Response streaming back.
    ResponseReceived,
    /// Browser parses and paints.
    Rendering,
}

const STAGES: [RequestPhase; 7] = [
    RequestPhase::DnsLookup,
    RequestPhase::TcpHandshake,
    RequestPhase::TlsHandshake,
    RequestPhase::RequestSent,
    RequestPhase::ServerProcessing,
    RequestPhase::ResponseReceived,
    RequestPhase::Rendering,
];

impl RequestPhase {
    fn describe(self) -> &'static str {
        match self {
            Self::Idle => "Press send to request https://example.com/",
            Self::DnsLookup => "The browser asks a DNS resolver for the server's IP address.",
            Self::TcpHandshake => "SYN, SYN-ACK, ACK: a TCP connection is opened.",
            Self::TlsHandshake => "Client and server agree on keys for an encrypted channel.",
            Self::RequestSent => "GET / HTTP/1.1 is sent along with its headers.",
            Self::ServerProcessing => "The server routes the request and builds a response.",
            Self::ResponseReceived => "200 OK arrives with the HTML document in its body.",
            Self::Rendering => "The browser parses the HTML, fetches assets and paints.",
        }
    }
}

/// Step-through simulation of an HTTP request, cycling back to idle when done.
#[derive(Debug)]
pub struct RequestFlow {
    seq: StagedSequence<RequestPhase>,
    completed: u32,
}

impl RequestFlow {
    /// Build a simulator resting in [`RequestPhase::Idle`].
    pub fn new() -> LessonResult<Self> {
        Ok(Self {
            seq: StagedSequence::new(RequestPhase::Idle, STAGES.to_vec(), PHASE_DELAY)?,
            completed: 0,
        })
    }

    /// Factory used by the registry.
    pub fn create() -> Box<dyn Visualization> {
        match Self::new() {
            Ok(w) => Box::new(w),
            Err(e) => panic!("{KEY}: invalid phase table: {e}"),
        }
    }

    /// Phase currently shown.
    pub fn phase(&self) -> RequestPhase {
        self.seq.current()
    }
}

impl Visualization for RequestFlow {
    fn key(&self) -> &'static str {
        KEY
    }

    fn title(&self) -> &'static str {
        "How an HTTP Request Travels"
    }

    fn view(&self) -> serde_json::Value {
        let phase = self.seq.current();
        serde_json::json!({
            "phase": phase,
            "description": phase.describe(),
            "step": self.seq.stage_index().map(|i| i + 1),
            "steps": self.seq.stage_count(),
            "running": self.seq.is_running(),
            "completed_cycles": self.completed,
        })
    }

    fn handle(&mut self, input: &Interaction) -> LessonResult<()> {
        match input {
            Interaction::Press { control } if control == "send" => {
                self.seq.start();
                Ok(())
            }
            Interaction::Press { control } if control == "reset" => {
                self.seq.reset();
                Ok(())
            }
            _ => Err(input.unsupported(KEY)),
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        let entered = self.seq.advance(elapsed);
        if entered.last() == Some(&RequestPhase::Idle) {
            self.completed += 1;
        }
    }

    fn pending_transition(&self) -> Option<Duration> {
        self.seq.pending()
    }

    fn unmount(&mut self) {
        self.seq.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/request_flow.rs"]
mod tests;
