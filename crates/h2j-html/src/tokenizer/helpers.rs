//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! State transitions, input handling with line/column tracking, the text
//! buffer, token emission and recovery of unterminated markup.

use h2j_common::warning::warn_once;

use crate::parser::is_raw_text_element;

use super::character_reference::match_reference;
use super::machine::{HTMLTokenizer, TokenizerState};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Advances the cursor, counting lines at `\n`. Returns None at the end
    /// of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        self.current_input_offset = self.current_pos;
        self.current_input_position = self.cursor;
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        if c == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }
        Some(c)
    }

    /// Peek at a codepoint at the given offset from the current position without
    /// consuming it.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        let mut upcoming = self.input[self.current_pos..].chars();
        target
            .chars()
            .all(|expected| upcoming.next().is_some_and(|c| c.eq_ignore_ascii_case(&expected)))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) fn consume_string(&mut self, target: &str) {
        for _ in target.chars() {
            let _ = self.consume();
        }
    }

    /// [ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace):
    /// TAB, LF, FF, CR or SPACE.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }

    /// True when the `<` just consumed starts the end tag of the current
    /// raw text element.
    pub(super) fn at_appropriate_end_tag(&self) -> bool {
        let Some(tag) = self.raw_text_tag.as_deref() else {
            return false;
        };
        let closing = format!("/{tag}");
        if !self.next_few_characters_are_case_insensitive(&closing) {
            return false;
        }
        self.peek_codepoint(closing.chars().count())
            .is_none_or(|c| Self::is_whitespace_char(c) || c == '/' || c == '>')
    }
}

// =============================================================================
// Character Data Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Add the current input character to the pending text run.
    pub(super) fn append_text(&mut self, c: char) {
        if self.text_start.is_none() {
            self.text_start = Some(self.current_input_position);
        }
        self.text_buffer.push(c);
    }

    /// Remember where the markup starting at the current `<` begins.
    pub(super) const fn begin_markup(&mut self) {
        self.markup_start = self.current_input_offset;
        self.markup_position = self.current_input_position;
    }

    /// The `<` that opened the current markup turned out to be data.
    pub(super) fn append_markup_open_as_text(&mut self) {
        if self.text_start.is_none() {
            self.text_start = Some(self.markup_position);
        }
        self.text_buffer.push('<');
    }

    /// Emit the pending text run, if any, as a single text token.
    pub(super) fn flush_text(&mut self) {
        if self.text_buffer.is_empty() {
            return;
        }
        let position = self.text_start.take().unwrap_or(self.markup_position);
        let data = std::mem::take(&mut self.text_buffer);
        self.pending.push_back(Token::Text { data, position });
    }

    /// End of input: flush what is left and stop.
    pub(super) fn finish(&mut self) {
        self.flush_text();
        self.at_eof = true;
    }

    /// The input ended inside a tag, declaration or comment. Everything from
    /// its `<` onwards becomes character data.
    pub(super) fn recover_markup_as_text(&mut self) {
        self.current_token = None;
        self.log_parse_error("unterminated markup kept as text");
        if self.text_start.is_none() {
            self.text_start = Some(self.markup_position);
        }
        let rest = &self.input[self.markup_start..];
        self.text_buffer.push_str(rest);
        self.finish();
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current token"
    ///
    /// Pending text is flushed first so tokens stay in source order. A
    /// `<script>` or `<style>` start tag switches the tokenizer to RAWTEXT.
    pub(super) fn emit_token(&mut self) {
        let Some(token) = self.current_token.take() else {
            return;
        };
        self.flush_text();
        if let Token::StartTag {
            name,
            self_closing: false,
            ..
        } = &token
            && is_raw_text_element(name)
        {
            self.raw_text_tag = Some(name.clone());
            self.switch_to(TokenizerState::RAWTEXT);
        }
        self.pending.push_back(token);
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        if let Some(token) = self.current_token.as_mut() {
            token.start_new_attribute();
        }
    }

    /// "Append the current input character to the current attribute's name."
    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_name(c);
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        let mut buf = [0; 4];
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_value(c.encode_utf8(&mut buf));
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// The `&` has been consumed. Decode the reference that follows into the
    /// current attribute value, or keep the `&` when nothing matches.
    pub(super) fn consume_character_reference_in_attribute(&mut self) {
        match match_reference(&self.input[self.current_pos..], true) {
            Some((replacement, consumed)) => {
                let end = self.current_pos + consumed;
                while self.current_pos < end {
                    let _ = self.consume();
                }
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_current_attribute_value(&replacement);
                }
            }
            None => self.append_to_attribute_value('&'),
        }
    }

    /// Report a recovered parse error with the state it was met in.
    pub(super) fn log_parse_error(&self, message: &str) {
        let position = self.current_input_position;
        let state = self.state();
        warn_once(
            "HTML Tokenizer",
            &format!("{message} in {state} state at {position}"),
        );
    }
}
