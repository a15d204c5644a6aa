//! Protocol modules.
//!
//! Only one wire format exists today: the JSON status datagram emitted by the
//! proxy plugin. The parser is panic-free: malformed input is reported as
//! `BackstatError` instead of panicking, keeping the collector resilient to
//! garbage on the port.

pub mod update;
