// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound event specs: parsing and evaluation.
//!
//! A spec is a space-separated list of [`Token`]s. It is validated once, at
//! registration, into an [`EventSpec`] that keeps the raw string (which is
//! also the name of the event it emits) and the parsed [`TokenSet`].
//!
//! Evaluation is a strict conjunction: every token present must hold for the
//! spec to trigger. `partially` has no condition of its own; it only switches
//! `out` from "fully outside" to "at least partially outside". `out` in turn
//! switches `top` from the edge-crossing test to "above the viewport".

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::error::InvalidEventSpec;
use crate::geometry::GeometrySnapshot;

/// A single word of the position-event vocabulary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Element fully inside the viewport.
    In,
    /// Element outside the viewport (fully, or partially with [`Token::Partially`]).
    Out,
    /// Modifier for [`Token::Out`].
    Partially,
    /// Element's vertical center on, or crossing, the viewport's horizontal midline.
    Middle,
    /// Element's top edge on, or crossing, the viewport top.
    Top,
    /// Element's bottom edge on, or crossing, the viewport bottom.
    Bottom,
    /// Element's left edge on, or crossing, the viewport left.
    Left,
    /// Element's horizontal center on, or crossing, the viewport's vertical midline.
    Center,
    /// Element's right edge on, or crossing, the viewport right.
    Right,
}

impl Token {
    /// The whole vocabulary.
    pub const ALL: [Self; 9] = [
        Self::In,
        Self::Out,
        Self::Partially,
        Self::Middle,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Center,
        Self::Right,
    ];

    /// Tokens that carry a condition, in evaluation order.
    const CHECKED: [Self; 8] = [
        Self::In,
        Self::Out,
        Self::Top,
        Self::Left,
        Self::Right,
        Self::Bottom,
        Self::Middle,
        Self::Center,
    ];

    /// The token as it appears in a spec string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Partially => "partially",
            Self::Middle => "middle",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Look a token up by name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// The single-bit set for this token.
    #[must_use]
    pub const fn flag(self) -> TokenSet {
        match self {
            Self::In => TokenSet::IN,
            Self::Out => TokenSet::OUT,
            Self::Partially => TokenSet::PARTIALLY,
            Self::Middle => TokenSet::MIDDLE,
            Self::Top => TokenSet::TOP,
            Self::Bottom => TokenSet::BOTTOM,
            Self::Left => TokenSet::LEFT,
            Self::Center => TokenSet::CENTER,
            Self::Right => TokenSet::RIGHT,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Set of tokens present in a spec. Order and repetition are irrelevant.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenSet: u16 {
        /// [`Token::In`]
        const IN        = 1 << 0;
        /// [`Token::Out`]
        const OUT       = 1 << 1;
        /// [`Token::Partially`]
        const PARTIALLY = 1 << 2;
        /// [`Token::Middle`]
        const MIDDLE    = 1 << 3;
        /// [`Token::Top`]
        const TOP       = 1 << 4;
        /// [`Token::Bottom`]
        const BOTTOM    = 1 << 5;
        /// [`Token::Left`]
        const LEFT      = 1 << 6;
        /// [`Token::Center`]
        const CENTER    = 1 << 7;
        /// [`Token::Right`]
        const RIGHT     = 1 << 8;
    }
}

/// A validated compound event spec such as `"partially out top"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventSpec {
    raw: String,
    tokens: TokenSet,
}

impl EventSpec {
    /// Parse and validate a space-separated spec.
    ///
    /// Tokens are split on single spaces, so an empty spec, or one with
    /// leading, trailing or doubled spaces, contains an empty token and is
    /// rejected.
    ///
    /// ```
    /// use vantage_position::{EventSpec, Token};
    ///
    /// let spec = EventSpec::parse("partially out top").unwrap();
    /// assert!(spec.contains(Token::Out));
    /// assert_eq!(spec.as_str(), "partially out top");
    ///
    /// let err = EventSpec::parse("in sideways").unwrap_err();
    /// assert_eq!(err.token, "sideways");
    /// ```
    pub fn parse(spec: &str) -> Result<Self, InvalidEventSpec> {
        let mut tokens = TokenSet::empty();
        for word in spec.split(' ') {
            match Token::from_name(word) {
                Some(token) => tokens |= token.flag(),
                None => return Err(InvalidEventSpec::new(word, spec)),
            }
        }
        Ok(Self {
            raw: String::from(spec),
            tokens,
        })
    }

    /// Build a spec from known tokens; the raw string joins them with spaces.
    ///
    /// ```
    /// use vantage_position::{EventSpec, Token};
    ///
    /// let spec = EventSpec::from_tokens(&[Token::Partially, Token::Out, Token::Top]);
    /// assert_eq!(spec, EventSpec::parse("partially out top").unwrap());
    /// ```
    #[must_use]
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut raw = String::new();
        let mut set = TokenSet::empty();
        for (idx, token) in tokens.iter().enumerate() {
            if idx > 0 {
                raw.push(' ');
            }
            raw.push_str(token.as_str());
            set |= token.flag();
        }
        Self { raw, tokens: set }
    }

    /// The spec string as registered; also the name of the event it emits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed token set.
    #[must_use]
    pub fn tokens(&self) -> TokenSet {
        self.tokens
    }

    /// Returns `true` if `token` appears in the spec.
    #[must_use]
    pub fn contains(&self, token: Token) -> bool {
        self.tokens.contains(token.flag())
    }

    /// Evaluate the spec against one geometry snapshot.
    ///
    /// Each token present contributes one predicate; the result is their
    /// conjunction. Every predicate is evaluated, so a later success never
    /// clears an earlier failure.
    #[must_use]
    pub fn matches(&self, geometry: &GeometrySnapshot) -> bool {
        let out = self.contains(Token::Out);
        let partially = self.contains(Token::Partially);
        Token::CHECKED
            .into_iter()
            .filter(|&token| self.contains(token))
            .fold(true, |trigger, token| {
                trigger & check(token, geometry, out, partially)
            })
    }
}

fn check(token: Token, g: &GeometrySnapshot, out: bool, partially: bool) -> bool {
    match token {
        Token::In => g.is_inside(),
        Token::Out if partially => g.is_partially_outside(),
        Token::Out => g.is_fully_outside(),
        Token::Top if out => g.top() < 0.0,
        Token::Top => g.top_edge(),
        Token::Left => g.left_edge(),
        Token::Right => g.right_edge(),
        Token::Bottom => g.bottom_edge(),
        Token::Middle => g.middle_line(),
        Token::Center => g.center_line(),
        Token::Partially => true,
    }
}

impl FromStr for EventSpec {
    type Err = InvalidEventSpec;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EventSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
