//! Protocol core for a Palaver chat client.
//!
//! A client is one actor in a decentralized publish/subscribe chat: it
//! discovers which directory-advertised manager is currently authoritative,
//! keeps a live roster subscription against it, and fans spoken sentences
//! out to the participants it currently knows about.
//!
//! The crate is sans-IO: [`Client`] is a pure state machine that consumes
//! [`ClientEvent`] inputs and produces [`ClientAction`] instructions for a
//! runtime to execute. Four loosely-coupled concerns live behind one
//! `handle` call, mirroring the reactive tasks of the protocol:
//!
//! - manager location with sticky failover (`locator`)
//! - roster subscription with re-subscription on manager change
//!   (`subscription`)
//! - inbound utterance listening (`listener`)
//! - utterance fan-out (`speaker`)
//!
//! All shared state (`ActiveManager`, the participant set) is owned by the
//! `Client` and mutated on the caller's single thread, with one writer per
//! field. Per-message failures are logged and dropped; nothing in here is
//! fatal to the actor.

mod client;
mod env;
mod event;
mod listener;
mod locator;
mod speaker;
mod subscription;

pub use client::{Client, ClientIdentity};
pub use env::Environment;
pub use event::{ClientAction, ClientEvent};
