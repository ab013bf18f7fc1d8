//! Conversation worker
//!
//! Drives the USSD search conversation and the SMS delivery leg that
//! follows it. One inbound message advances the sender's session exactly
//! one step; sessions live in the [`SessionStore`] between messages and
//! are cleared when the conversation ends.

use serde::Deserialize;

use minipedia_core::{normalize_whitespace, ArticleExtract, ContentFormatter, Paginator};

use crate::cache::ExtractCache;
use crate::client::EncyclopediaClient;
use crate::error::{Result, WorkerError};
use crate::menu::{fit_menu, parse_selection};
use crate::message::{InboundMessage, SessionEvent};
use crate::session::{Session, SessionState};
use crate::store::SessionStore;
use crate::transport::ReplyTransport;

const SEARCH_PROMPT: &str = "What would you like to search Wikipedia for?";
const INVALID_SELECTION: &str = "Sorry, invalid selection. Please restart and try again";
const PROCESSING_ERROR: &str =
    "Sorry, there was an error processing your request. Please try again later.";
const SMS_NOTICE: &str = "\n(Full content sent by SMS.)";
const SMS_MORE: &str = " (reply for more)";
const SMS_END: &str = " (end of section)";

/// Tunable behavior of the conversation worker.
///
/// Deserializes with every field optional; the defaults reproduce the
/// stock deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// USSD screen budget for GSM-compatible text, in characters
    pub max_ussd_content_length: usize,
    /// USSD screen budget once content contains non-ASCII text
    pub max_ussd_unicode_length: usize,
    /// SMS budget for GSM-compatible text, in characters
    pub max_sms_content_length: usize,
    /// SMS budget once content contains non-ASCII text
    pub max_sms_unicode_length: usize,
    /// Most search results ever requested from the client
    pub max_search_results: usize,
    /// Window for snapping a truncation back to a sentence end; 0 disables
    pub sentence_break_threshold: usize,
    /// Deliver selected content by SMS after the USSD reply
    pub send_sms_content: bool,
    /// Offer "reply for more" continuation over SMS; when off, content
    /// delivery is a single SMS
    pub sms_more_enabled: bool,
    /// Send every SMS to this address instead of the requester
    pub override_sms_address: Option<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            max_ussd_content_length: 160,
            max_ussd_unicode_length: 70,
            max_sms_content_length: 160,
            max_sms_unicode_length: 70,
            max_search_results: 9,
            sentence_break_threshold: 10,
            send_sms_content: true,
            sms_more_enabled: true,
            override_sms_address: None,
        }
    }
}

/// Whether the conversation continues after one step.
enum Flow {
    Continue,
    End,
}

/// The conversation worker.
///
/// Owns its collaborators and two formatters sized for the USSD and SMS
/// channels. All behavior runs through [`Self::handle_ussd_message`] and
/// [`Self::handle_sms_message`].
pub struct UssdWorker {
    config: WorkerConfig,
    client: Box<dyn EncyclopediaClient>,
    store: Box<dyn SessionStore>,
    cache: Box<dyn ExtractCache>,
    transport: Box<dyn ReplyTransport>,
    ussd_formatter: ContentFormatter,
    sms_formatter: ContentFormatter,
}

impl UssdWorker {
    /// Build a worker around the given collaborators.
    pub fn new(
        config: WorkerConfig,
        client: Box<dyn EncyclopediaClient>,
        store: Box<dyn SessionStore>,
        cache: Box<dyn ExtractCache>,
        transport: Box<dyn ReplyTransport>,
    ) -> Self {
        let ussd_formatter =
            ContentFormatter::new(config.max_ussd_content_length, config.max_ussd_unicode_length)
                .sentence_break_threshold(config.sentence_break_threshold);
        let sms_formatter =
            ContentFormatter::new(config.max_sms_content_length, config.max_sms_unicode_length)
                .sentence_break_threshold(config.sentence_break_threshold);
        UssdWorker {
            config,
            client,
            store,
            cache,
            transport,
            ussd_formatter,
            sms_formatter,
        }
    }

    /// Process one inbound USSD message.
    ///
    /// Loads the sender's session, advances the conversation one step and
    /// persists the outcome. A processing failure is answered with an
    /// apology and clears the session; only store and transport failures
    /// surface to the caller.
    pub fn handle_ussd_message(&mut self, msg: &InboundMessage) -> Result<()> {
        log::debug!("USSD from {}: {:?}", msg.from_addr, msg.content);
        if msg.effective_event() == SessionEvent::Close {
            self.store.clear(&msg.from_addr)?;
            return Ok(());
        }

        let mut session = match self.store.load(&msg.from_addr)? {
            Some(session) if msg.effective_event() != SessionEvent::New => session,
            _ => Session::new(),
        };

        match self.process(msg, &mut session) {
            Ok(Flow::Continue) => self.store.save(&msg.from_addr, &session)?,
            Ok(Flow::End) => self.store.clear(&msg.from_addr)?,
            Err(err) => {
                log::error!("Failed to process message from {}: {err}", msg.from_addr);
                let apology = self.transport.reply(&msg.from_addr, PROCESSING_ERROR, false);
                self.store.clear(&msg.from_addr)?;
                apology?;
            }
        }
        Ok(())
    }

    /// Process one inbound SMS.
    ///
    /// Any SMS from a user with content delivery in progress requests the
    /// next chunk; messages from anyone else are dropped. Failures clear
    /// the delivery and surface to the caller.
    pub fn handle_sms_message(&mut self, msg: &InboundMessage) -> Result<()> {
        log::debug!("SMS from {}: {:?}", msg.from_addr, msg.content);
        let mut session = match self.store.load(&msg.from_addr)? {
            Some(session) if session.state == SessionState::More => session,
            _ => return Ok(()),
        };

        match self.next_sms_chunk(&msg.from_addr, &mut session) {
            Ok(Flow::Continue) => self.store.save(&msg.from_addr, &session)?,
            Ok(Flow::End) => self.store.clear(&msg.from_addr)?,
            Err(err) => {
                log::error!("Failed to continue SMS delivery to {}: {err}", msg.from_addr);
                self.store.clear(&msg.from_addr)?;
                return Err(err);
            }
        }
        Ok(())
    }

    fn process(&mut self, msg: &InboundMessage, session: &mut Session) -> Result<Flow> {
        match session.state {
            SessionState::New => self.process_new(msg, session),
            SessionState::Searching => self.process_searching(msg, session),
            SessionState::Sections => self.process_sections(msg, session),
            SessionState::Content => self.process_content(msg, session),
            SessionState::More => {
                // A USSD dial while SMS delivery is pending starts over.
                *session = Session::new();
                self.process_new(msg, session)
            }
        }
    }

    fn process_new(&mut self, msg: &InboundMessage, session: &mut Session) -> Result<Flow> {
        self.transport.reply(&msg.from_addr, SEARCH_PROMPT, true)?;
        session.state = SessionState::Searching;
        Ok(Flow::Continue)
    }

    fn process_searching(&mut self, msg: &InboundMessage, session: &mut Session) -> Result<Flow> {
        let query = msg.trimmed_content();
        let mut results = self.client.search(query, self.config.max_search_results)?;
        if results.is_empty() {
            let text = format!("Sorry, no Wikipedia results for {query}");
            self.transport.reply(&msg.from_addr, &text, false)?;
            return Ok(Flow::End);
        }

        let (count, text) = fit_menu(&results, "", self.config.max_ussd_content_length);
        results.truncate(count);
        session.results = results;
        session.state = SessionState::Sections;
        self.transport.reply(&msg.from_addr, &text, true)?;
        Ok(Flow::Continue)
    }

    fn process_sections(&mut self, msg: &InboundMessage, session: &mut Session) -> Result<Flow> {
        let Some(index) = parse_selection(msg.trimmed_content(), session.results.len()) else {
            return self.invalid_selection(&msg.from_addr);
        };
        let title = session.results[index].clone();
        let extract = self.cached_extract(&title)?;

        let mut options = vec![title.clone()];
        options.extend(extract.section_titles().into_iter().map(str::to_string));
        let (count, text) = fit_menu(&options, "", self.config.max_ussd_content_length);
        options.truncate(count);

        session.page = Some(title);
        session.fullurl = extract.fullurl().to_string();
        session.results = options;
        session.state = SessionState::Content;
        self.transport.reply(&msg.from_addr, &text, true)?;
        Ok(Flow::Continue)
    }

    fn process_content(&mut self, msg: &InboundMessage, session: &mut Session) -> Result<Flow> {
        let Some(index) = parse_selection(msg.trimmed_content(), session.results.len()) else {
            return self.invalid_selection(&msg.from_addr);
        };
        let title = session
            .page
            .clone()
            .ok_or(WorkerError::InvalidSession("no article selected"))?;
        let extract = self.cached_extract(&title)?;
        let section = extract
            .sections()
            .get(index)
            .ok_or(WorkerError::InvalidSession("selection outside the section list"))?;
        let content = normalize_whitespace(&section.full_text());

        let ussd_text = self.ussd_formatter.format(&content, SMS_NOTICE)?;
        self.transport.reply(&msg.from_addr, &ussd_text, false)?;

        if !self.config.send_sms_content {
            return Ok(Flow::End);
        }
        self.start_sms_delivery(&msg.from_addr, session, content)
    }

    fn invalid_selection(&mut self, to_addr: &str) -> Result<Flow> {
        self.transport.reply(to_addr, INVALID_SELECTION, false)?;
        Ok(Flow::End)
    }

    /// Fetch an extract through the cache, hitting the client on a miss.
    fn cached_extract(&mut self, title: &str) -> Result<ArticleExtract> {
        if let Some(raw) = self.cache.get(title)? {
            return Ok(ArticleExtract::from_json(&raw)?);
        }
        let extract = self.client.get_extract(title)?;
        self.cache.put(title, &extract.to_json()?)?;
        Ok(extract)
    }

    /// Send the opening SMS for `content`, persisting `More` state when
    /// continuation chunks remain.
    fn start_sms_delivery(
        &mut self,
        from_addr: &str,
        session: &mut Session,
        content: String,
    ) -> Result<Flow> {
        let to_addr = self.sms_destination(from_addr).to_string();
        if !self.config.sms_more_enabled {
            let text = self.sms_formatter.format(&content, "")?;
            self.transport.send_sms(&to_addr, &text)?;
            return Ok(Flow::End);
        }

        let (text, offset, finished) = {
            let mut pager = Paginator::new(&self.sms_formatter, &content, SMS_MORE, SMS_END);
            let text = match pager.next_chunk() {
                Some(chunk) => chunk?,
                None => return Ok(Flow::End),
            };
            (text, pager.offset(), pager.is_finished())
        };
        self.transport.send_sms(&to_addr, &text)?;
        if finished {
            return Ok(Flow::End);
        }
        session.sms_content = content;
        session.sms_offset = offset;
        session.state = SessionState::More;
        Ok(Flow::Continue)
    }

    fn next_sms_chunk(&mut self, from_addr: &str, session: &mut Session) -> Result<Flow> {
        let (text, offset, finished) = {
            let mut pager = Paginator::resume(
                &self.sms_formatter,
                &session.sms_content,
                session.sms_offset,
                SMS_MORE,
                SMS_END,
            );
            let text = match pager.next_chunk() {
                Some(chunk) => chunk?,
                None => return Ok(Flow::End),
            };
            (text, pager.offset(), pager.is_finished())
        };
        let to_addr = self.sms_destination(from_addr).to_string();
        self.transport.send_sms(&to_addr, &text)?;
        if finished {
            return Ok(Flow::End);
        }
        session.sms_offset = offset;
        Ok(Flow::Continue)
    }

    /// Where SMS content goes, honoring the address override.
    fn sms_destination<'a>(&'a self, from_addr: &'a str) -> &'a str {
        self.config
            .override_sms_address
            .as_deref()
            .unwrap_or(from_addr)
    }
}
