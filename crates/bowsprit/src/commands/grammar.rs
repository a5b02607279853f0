//! Grammar for the single-line classifier declaration
//!
//! The name portion has four overlapping alternatives tried in a fixed
//! order, first match wins:
//!
//! 1. `"Display" as Code`   (the quoted text may end in an inline generic)
//! 2. `Code as "Display"`
//! 3. `Code`
//! 4. `"Code"`
//!
//! After the name come optional clauses whose relative order is fixed:
//! `<generic>`, `<<stereotype>>`, `$tags`, `[[url]]`, `#fillcolor`,
//! `##[style]linecolor`, `extends codes`, `implements codes`, `{ }`.
//! Reordering is not supported.

use crate::core::chumsky_utils::{
    inline_whitespace, inline_whitespace_required, quoted_inner, raw_until,
};
use crate::model::ClassifierKind;
use chumsky::prelude::*;
use chumsky::text;

/// Which of the four name alternatives matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameForm {
    /// `"Display" as Code`
    DisplayAsCode { display: String, code: String },
    /// `Code as "Display"`
    CodeAsDisplay { code: String, display: String },
    /// `Code`
    Bare { code: String },
    /// `"Code"`
    Quoted { code: String },
}

/// The `##[style]color` line-color clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineColorClause {
    pub style: Option<String>,
    pub color: Option<String>,
}

/// Raw captures of one matched declaration line
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub kind: ClassifierKind,
    pub name: NameForm,
    /// Explicit `<...>` clause (quoted-display generics live in `name`)
    pub generic: Option<String>,
    /// Raw `<<...>>` source including delimiters
    pub stereotype: Option<String>,
    pub tags: Vec<String>,
    /// Inner text of the `[[...]]` clause
    pub url: Option<String>,
    /// Fill color spec, without the leading `#`
    pub back_color: Option<String>,
    pub line_color: Option<LineColorClause>,
    /// Raw comma-separated target lists
    pub extends: Option<String>,
    pub implements: Option<String>,
    pub empty_body: bool,
}

/// Normalized semantic values extracted from the matched captures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFields {
    /// Short code with paired quote/bracket markers stripped
    pub code: String,
    /// Display text before newline expansion
    pub display: String,
    /// Resolved generic: quoted-display generic wins over the explicit clause
    pub generic: Option<String>,
}

impl ClassDeclaration {
    /// Normalize the matched captures into semantic values
    pub fn fields(&self) -> DeclarationFields {
        let (raw_code, display, quoted_generic) = match &self.name {
            NameForm::DisplayAsCode { display, code }
            | NameForm::CodeAsDisplay { code, display } => {
                let (display, generic) = split_display_generic(display);
                (code.clone(), display, generic)
            }
            NameForm::Bare { code } | NameForm::Quoted { code } => {
                (code.clone(), code.clone(), None)
            }
        };
        DeclarationFields {
            code: strip_code_markers(&raw_code).to_string(),
            display,
            generic: quoted_generic.or_else(|| self.generic.clone()),
        }
    }
}

/// Try the declaration grammar against one line
pub fn parse_declaration(line: &str) -> Option<ClassDeclaration> {
    declaration().parse(line).into_result().ok()
}

fn declaration<'src>() -> impl Parser<'src, &'src str, ClassDeclaration> {
    let kind = classifier_kind();
    let name = name_form();

    let stereotype = just("<<")
        .then(raw_until(">>"))
        .then(just(">>"))
        .to_slice()
        .map(|s: &str| s.to_string());

    let tag = just('$').ignore_then(text::ident()).map(|s: &str| s.to_string());
    let tags = tag
        .separated_by(inline_whitespace_required())
        .at_least(1)
        .collect::<Vec<_>>();

    let url = just("[[")
        .ignore_then(raw_until("]]"))
        .then_ignore(just("]]"))
        .map(|s: &str| s.to_string());

    let color_word = any()
        .filter(|c: &char| c.is_ascii_alphanumeric())
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string());

    let back_color = just('#').ignore_then(color_word.clone());

    let stroke_keyword = just('[')
        .ignore_then(choice((just("dotted"), just("dashed"), just("bold"))))
        .then_ignore(just(']'))
        .map(|s: &str| s.to_string());
    let line_color = just("##")
        .ignore_then(stroke_keyword.or_not())
        .then(color_word.or_not())
        .map(|(style, color)| LineColorClause { style, color });

    let extends = text::keyword("extends")
        .ignore_then(inline_whitespace_required())
        .ignore_then(code_list());
    let implements = text::keyword("implements")
        .ignore_then(inline_whitespace_required())
        .ignore_then(code_list());

    let empty_body = just('{')
        .then(inline_whitespace())
        .then(just('}'))
        .ignored();

    kind.then_ignore(inline_whitespace_required())
        .then(name)
        .then(inline_whitespace().ignore_then(generic_clause()).or_not())
        .then(inline_whitespace().ignore_then(stereotype).or_not())
        .then(inline_whitespace_required().ignore_then(tags).or_not())
        .then(inline_whitespace().ignore_then(url).or_not())
        .then(inline_whitespace().ignore_then(back_color).or_not())
        .then(inline_whitespace().ignore_then(line_color).or_not())
        .then(inline_whitespace_required().ignore_then(extends).or_not())
        .then(inline_whitespace_required().ignore_then(implements).or_not())
        .then(inline_whitespace().ignore_then(empty_body).or_not())
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .map(
            |((((((((((kind, name), generic), stereotype), tags), url), back_color), line_color), extends), implements), empty_body)| {
                ClassDeclaration {
                    kind,
                    name,
                    generic,
                    stereotype,
                    tags: tags.unwrap_or_default(),
                    url,
                    back_color,
                    line_color,
                    extends,
                    implements,
                    empty_body: empty_body.is_some(),
                }
            },
        )
}

// Keyword order matters: `abstract class` must be tried before `abstract`,
// and both before `class`, because matches commit at the first success.
fn classifier_kind<'src>() -> impl Parser<'src, &'src str, ClassifierKind> + Clone {
    let abstract_class = text::keyword("abstract")
        .then(inline_whitespace_required())
        .then(text::keyword("class"))
        .to(ClassifierKind::AbstractClass);
    choice((
        text::keyword("interface").to(ClassifierKind::Interface),
        text::keyword("enum").to(ClassifierKind::Enum),
        text::keyword("annotation").to(ClassifierKind::Annotation),
        abstract_class,
        text::keyword("abstract").to(ClassifierKind::AbstractClass),
        text::keyword("class").to(ClassifierKind::Class),
        text::keyword("entity").to(ClassifierKind::Entity),
        text::keyword("circle").to(ClassifierKind::Circle),
        text::keyword("diamond").to(ClassifierKind::Diamond),
        text::keyword("protocol").to(ClassifierKind::Protocol),
        text::keyword("struct").to(ClassifierKind::Struct),
    ))
}

// A short code: no blanks, braces, quotes or angle brackets.
fn code<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    none_of(" \t\r\n{}\"<>")
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
}

// The four name alternatives, in authoritative order.
fn name_form<'src>() -> impl Parser<'src, &'src str, NameForm> + Clone {
    let display_as_code = quoted_inner()
        .map(|s: &str| s.to_string())
        .then_ignore(inline_whitespace_required())
        .then_ignore(text::keyword("as"))
        .then_ignore(inline_whitespace_required())
        .then(code())
        .map(|(display, code)| NameForm::DisplayAsCode { display, code });

    let code_as_display = code()
        .then_ignore(inline_whitespace_required())
        .then_ignore(text::keyword("as"))
        .then_ignore(inline_whitespace_required())
        .then(quoted_inner().map(|s: &str| s.to_string()))
        .map(|(code, display)| NameForm::CodeAsDisplay { code, display });

    let bare = code().map(|code| NameForm::Bare { code });

    let quoted = quoted_inner().map(|s: &str| NameForm::Quoted {
        code: s.to_string(),
    });

    choice((display_as_code, code_as_display, bare, quoted))
}

// Explicit `<...>` generic clause with balanced nesting. The body must not
// start with `<` so a `<<stereotype>>` clause is never consumed here.
fn generic_clause<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    let balanced = recursive(|balanced| {
        let nested = just('<').then(balanced).then(just('>')).ignored();
        choice((none_of("<>").ignored(), nested)).repeated().ignored()
    });
    just('<')
        .ignore_then(none_of("<>").ignored().then(balanced).to_slice())
        .then_ignore(just('>'))
        .map(|s: &str| s.to_string())
}

// A raw comma-separated list of relationship target codes.
fn code_list<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    let target = none_of(" \t\r\n{}\"<>,").repeated().at_least(1).ignored();
    let separator = inline_whitespace()
        .then(just(','))
        .then(inline_whitespace())
        .ignored();
    target
        .clone()
        .then(separator.then(target).repeated().ignored())
        .to_slice()
        .map(|s: &str| s.to_string())
}

/// Split a raw target list on commas
pub fn split_code_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Strip one pair of wrapping markers from a short code: `"x"`, `(x)`,
/// `[x]` or `:x:` all become `x`.
pub fn strip_code_markers(code: &str) -> &str {
    for (open, close) in [('"', '"'), ('(', ')'), ('[', ']'), (':', ':')] {
        if code.len() > 1 && code.starts_with(open) && code.ends_with(close) {
            return &code[open.len_utf8()..code.len() - close.len_utf8()];
        }
    }
    code
}

/// Split a trailing balanced `<...>` generic off quoted display text
///
/// `List<T>` becomes (`List`, `T`); text without a trailing generic block is
/// returned unchanged. An all-generic display like `<T>` stays display text.
pub fn split_display_generic(display: &str) -> (String, Option<String>) {
    if !display.ends_with('>') {
        return (display.to_string(), None);
    }
    let mut depth = 0usize;
    for (i, c) in display.char_indices().rev() {
        match c {
            '>' => depth += 1,
            '<' => {
                depth -= 1;
                if depth == 0 {
                    let generic = &display[i + 1..display.len() - 1];
                    if i == 0 || generic.is_empty() {
                        break;
                    }
                    return (display[..i].to_string(), Some(generic.to_string()));
                }
            }
            _ => {}
        }
    }
    (display.to_string(), None)
}
