use pest::Parser;
use pest_derive::Parser;

use crate::errors::{Error, Result as TemplateResult};

// This include forces recompiling this source file if the grammar file changes.
// Uncomment it when doing changes to the .pest file
const _GRAMMAR: &str = include_str!("xtemplate.pest");

#[derive(Parser)]
#[grammar = "parser/xtemplate.pest"]
pub struct XTemplateParser;

/// The AST of a template document
pub mod ast;


use self::ast::*;

/// Name of the block wrapping the whole document
pub const ROOT_BLOCK: &str = "root";
/// First segment of a tag referencing the parsed output of a block
pub const BLOCK_REF: &str = "_BLOCK_";

/// The tag injected in a parent block where a child block was declared
pub fn block_placeholder(qualified_name: &str) -> String {
    format!("{{{}.{}}}", BLOCK_REF, qualified_name)
}

fn pest_error(e: pest::error::Error<Rule>) -> Error {
    let fancy_e = e.renamed_rules(|rule| match *rule {
        Rule::EOI => "end of input".to_string(),
        Rule::ws => "whitespace".to_string(),
        Rule::block_open => "`<!--`".to_string(),
        Rule::block_close => "`-->`".to_string(),
        Rule::begin_kw => "`BEGIN:`".to_string(),
        Rule::end_kw => "`END:`".to_string(),
        Rule::block_name => "a block name (letters, digits and `_`)".to_string(),
        Rule::directive_comment | Rule::tag_comment => "a comment (`# ...`)".to_string(),
        Rule::directive => "a block directive (`<!-- BEGIN: name -->`)".to_string(),
        Rule::text => "some text".to_string(),
        Rule::document => "a template".to_string(),
        Rule::tag_path => "a dotted identifier (letters, digits, `_` and `.`)".to_string(),
        Rule::tag => "a tag (`{name}`)".to_string(),
        Rule::literal => "some literal text".to_string(),
        Rule::content => "the content of a block".to_string(),
    });
    Error::msg(fancy_e)
}

/// Splits a template document into text and block directives
pub fn parse_directives(input: &str) -> TemplateResult<Vec<Directive>> {
    let mut pairs = XTemplateParser::parse(Rule::document, input).map_err(pest_error)?;
    let mut directives = vec![];

    // We must have at least a `document` pair if we got there
    for p in pairs.next().unwrap().into_inner() {
        match p.as_rule() {
            Rule::text => directives.push(Directive::Text(p.as_str())),
            Rule::directive => {
                let mut keyword = None;
                let mut name = None;

                for p2 in p.into_inner() {
                    match p2.as_rule() {
                        Rule::begin_kw | Rule::end_kw => keyword = Some(p2.as_rule()),
                        Rule::block_name => name = Some(p2.as_str()),
                        Rule::directive_comment => (),
                        _ => unreachable!("{:?} not supposed to get there (parse_directives)!", p2.as_rule()),
                    }
                }

                let name = name.unwrap();
                match keyword.unwrap() {
                    Rule::begin_kw => directives.push(Directive::Begin(name)),
                    _ => directives.push(Directive::End(name)),
                }
            }
            Rule::EOI => (),
            _ => unreachable!("unknown document rule: {:?}", p.as_rule()),
        }
    }

    Ok(directives)
}

/// Splits the raw content of a block into literal text and tags
pub fn parse_content(input: &str) -> TemplateResult<Vec<Segment>> {
    let mut pairs = XTemplateParser::parse(Rule::content, input).map_err(pest_error)?;
    let mut segments = vec![];

    for p in pairs.next().unwrap().into_inner() {
        match p.as_rule() {
            Rule::literal => segments.push(Segment::Text(p.as_str().to_string())),
            Rule::tag => {
                let tag = p.as_str();
                let mut path = None;
                for p2 in p.into_inner() {
                    match p2.as_rule() {
                        Rule::tag_path => path = Some(p2.as_str()),
                        Rule::tag_comment => (),
                        _ => unreachable!("{:?} not supposed to get there (parse_content)!", p2.as_rule()),
                    }
                }
                segments.push(Segment::from_tag(path.unwrap(), tag));
            }
            Rule::EOI => (),
            _ => unreachable!("unknown content rule: {:?}", p.as_rule()),
        }
    }

    Ok(segments)
}
