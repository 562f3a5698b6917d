use std::collections::VecDeque;

use h2j_dom::Position;
use strum_macros::Display;

use super::token::Token;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer states this compiler needs. Comment states collapse into
/// [`TokenizerState::Comment`] because comments never reach the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Content of `<script>` and `<style>`, up to the matching end tag.
    RAWTEXT,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    ///
    /// `<?...>` and unrecognized `<!...>` markup, skipped up to `>`.
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// Skips up to `-->`.
    Comment,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    ///
    /// Collects the declaration body verbatim up to `>`.
    Declaration,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// A lazy tokenizer: tokens are produced on demand through [`Iterator`].
/// Markup that is still open when the input ends (an unterminated tag,
/// declaration or comment) is recovered as character data, so every input
/// tokenizes.
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    /// Byte offset of the next character to consume.
    pub(super) current_pos: usize,
    /// Position of the next character to consume.
    pub(super) cursor: Position,
    pub(super) current_input_character: Option<char>,
    pub(super) current_input_offset: usize,
    pub(super) current_input_position: Position,
    pub(super) current_token: Option<Token>,
    pub(super) at_eof: bool,
    // When true, the next step will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    /// Tokens ready to be handed out.
    pub(super) pending: VecDeque<Token>,
    /// Character data accumulated since the last tag.
    pub(super) text_buffer: String,
    pub(super) text_start: Option<Position>,
    /// Byte offset and position of the `<` that opened the markup being read.
    pub(super) markup_start: usize,
    pub(super) markup_position: Position,
    /// Name of the `<script>` or `<style>` element whose content is being read.
    pub(super) raw_text_tag: Option<String>,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// "The initial state is the data state."
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            cursor: Position::START,
            current_input_character: None,
            current_input_offset: 0,
            current_input_position: Position::START,
            current_token: None,
            at_eof: false,
            reconsume: false,
            pending: VecDeque::new(),
            text_buffer: String::new(),
            text_start: None,
            markup_start: 0,
            markup_position: Position::START,
            raw_text_tag: None,
        }
    }

    /// The state the machine is in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Run the machine one character forward.
    fn step(&mut self) {
        // Each state begins by consuming the next input character,
        // unless we're reconsuming from a previous state transition.
        if self.reconsume {
            self.reconsume = false;
        } else {
            self.current_input_character = self.consume();
        }

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::RAWTEXT => self.handle_rawtext_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::Declaration => self.handle_declaration_state(),
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    ///
    /// Character references are left in place; text stays verbatim.
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => {
                self.begin_markup();
                self.switch_to(TokenizerState::TagOpen);
            }
            // "EOF - Emit an end-of-file token."
            None => self.finish(),
            Some(c) => self.append_text(c),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Only `</name` followed by whitespace, `/` or `>` ends raw text; every
    /// other `<` is data.
    fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            Some('<') if self.at_appropriate_end_tag() => {
                self.raw_text_tag = None;
                self.begin_markup();
                self.switch_to(TokenizerState::TagOpen);
            }
            None => self.finish(),
            Some(c) => self.append_text(c),
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // NOTE: We use reconsume_in here so that MarkupDeclarationOpen can peek ahead
            // without the main loop consuming a character first.
            Some('!') => self.reconsume_in(TokenizerState::MarkupDeclarationOpen),
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag(self.markup_position));
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error."
            Some('?') => {
                self.log_parse_error("processing instruction skipped");
                self.switch_to(TokenizerState::BogusComment);
            }
            None => self.recover_markup_as_text(),
            // "Anything else - This is an invalid-first-character-of-tag-name parse error.
            // Emit a U+003C LESS-THAN SIGN character token. Reconsume in the data state."
            Some(_) => {
                self.append_markup_open_as_text();
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag(self.markup_position));
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name parse
            // error. Switch to the data state."
            Some('>') => {
                self.log_parse_error("empty end tag </> ignored");
                self.switch_to(TokenizerState::Data);
            }
            None => self.recover_markup_as_text(),
            Some(_) => {
                self.log_parse_error("invalid first character of end tag name");
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.recover_markup_as_text(),
            // "ASCII upper alpha - Append the lowercase version of the current input
            // character to the current tag token's tag name."
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error. Start a new
            // attribute in the current tag token. Set that attribute's name to the
            // current input character."
            Some('=') => {
                self.log_parse_error("unexpected '=' before attribute name");
                self.start_new_attribute();
                self.append_to_attribute_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some(c) => self.append_to_attribute_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.recover_markup_as_text(),
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-attribute-value parse
            // error. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.log_parse_error("missing attribute value");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37 (single-quoted)](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            Some('&') => self.consume_character_reference_in_attribute(),
            None => self.recover_markup_as_text(),
            Some(c) => self.append_to_attribute_value(c),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => self.consume_character_reference_in_attribute(),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.recover_markup_as_text(),
            Some(c) => self.append_to_attribute_value(c),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.recover_markup_as_text(),
            // "Anything else - This is a missing-whitespace-between-attributes parse
            // error. Reconsume in the before attribute name state."
            Some(_) => {
                self.log_parse_error("missing whitespace between attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                if let Some(token) = self.current_token.as_mut() {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.recover_markup_as_text(),
            Some(_) => {
                self.log_parse_error("unexpected solidus in tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.switch_to(TokenizerState::Data),
            // Never closed: the fragment is data after all.
            None => self.recover_markup_as_text(),
            Some(_) => {}
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    fn handle_markup_declaration_open_state(&mut self) {
        // "If the next two characters are both U+002D HYPHEN-MINUS characters (-),
        // consume those two characters ... and switch to the comment start state."
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            self.switch_to(TokenizerState::Comment);
        }
        // "Otherwise, if the next seven characters are an ASCII case-insensitive
        // match for the word 'DOCTYPE'" the declaration is kept verbatim.
        else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.current_token = Some(Token::new_declaration(self.markup_position));
            self.switch_to(TokenizerState::Declaration);
        }
        // "Otherwise, this is an incorrectly-opened-comment parse error."
        else {
            self.log_parse_error("unrecognized markup declaration skipped");
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') if self.next_few_characters_are("->") => {
                self.consume_string("->");
                self.switch_to(TokenizerState::Data);
            }
            None => self.recover_markup_as_text(),
            Some(_) => {}
        }
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    fn handle_declaration_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.recover_markup_as_text(),
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_declaration(c);
                }
            }
        }
    }

    /// Tokenize the whole input at once.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.collect()
    }
}

impl Iterator for HTMLTokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.at_eof {
                return None;
            }
            self.step();
        }
    }
}
