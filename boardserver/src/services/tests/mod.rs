//! Tests for service implementations

mod poller;
