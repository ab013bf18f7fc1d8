//! Outbound messaging seam

use crate::error::TransportError;

/// Sends messages back to the user.
///
/// `reply` answers on the USSD channel of the message being processed;
/// `expect_reply` tells the gateway whether to hold the session open.
/// `send_sms` delivers content on the SMS channel instead. Encoding and
/// multipart handling live behind this trait, the worker only sizes text.
pub trait ReplyTransport {
    /// Answer the current USSD message.
    fn reply(&mut self, to_addr: &str, text: &str, expect_reply: bool)
        -> Result<(), TransportError>;

    /// Send a standalone SMS.
    fn send_sms(&mut self, to_addr: &str, text: &str) -> Result<(), TransportError>;
}
