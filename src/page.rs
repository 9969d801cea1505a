//! Module reference pages.
//!
//! Each IDL module gets one page listing its language mapping, constants,
//! type aliases, enumerations, structs and services. Every documented symbol
//! carries the anchor that resolved links point at, so a link such as
//! `tutorial.html#tutorial.Work:struct` lands on the definition of `Work`.

use crate::idl::{IdlField, IdlFunction, IdlModule, IdlStruct};
use crate::kind::SymbolKind;
use crate::render::escape_html;
use serde_json::Value;

/// Markup of a generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Markdown,
    Html,
}

impl PageFormat {
    /// HTML for `.html`/`.htm` pages and directory-style (`/`) pages, markdown otherwise
    pub fn for_extension(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        if ext == "html" || ext == "htm" || extension.ends_with('/') {
            PageFormat::Html
        } else {
            PageFormat::Markdown
        }
    }
}

fn anchor(kind: SymbolKind, qualified: &str) -> String {
    format!("{qualified}:{kind}")
}

/// Accumulates page markup in one format
struct PageWriter {
    format: PageFormat,
    out: String,
}

impl PageWriter {
    fn title(&mut self, text: &str, code: &str, anchor: &str) {
        match self.format {
            PageFormat::Markdown => {
                self.out
                    .push_str(&format!("<a id=\"{anchor}\"></a>\n\n# {text} `{code}`\n\n"));
            }
            PageFormat::Html => self.out.push_str(&format!(
                "<h1 id=\"{}\">{} <code>{}</code></h1>\n",
                escape_html(anchor),
                escape_html(text),
                escape_html(code)
            )),
        }
    }

    fn section(&mut self, title: &str) {
        match self.format {
            PageFormat::Markdown => self.out.push_str(&format!("## {title}\n\n")),
            PageFormat::Html => self.out.push_str(&format!("<h2>{}</h2>\n", escape_html(title))),
        }
    }

    fn entry(&mut self, label: &str, code: &str, anchor: &str) {
        let label = if label.is_empty() {
            String::new()
        } else {
            format!("{label} ")
        };
        match self.format {
            PageFormat::Markdown => self
                .out
                .push_str(&format!("<a id=\"{anchor}\"></a>\n\n### {label}`{code}`\n\n")),
            PageFormat::Html => self.out.push_str(&format!(
                "<h3 id=\"{}\">{}<code>{}</code></h3>\n",
                escape_html(anchor),
                escape_html(&label),
                escape_html(code)
            )),
        }
    }

    fn doc(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match self.format {
            PageFormat::Markdown => self.out.push_str(&format!("{text}\n\n")),
            PageFormat::Html => self.out.push_str(&format!("<p>{}</p>\n", escape_html(text))),
        }
    }

    fn signature(&mut self, code: &str) {
        match self.format {
            PageFormat::Markdown => self.out.push_str(&format!("`{code}`\n\n")),
            PageFormat::Html => self
                .out
                .push_str(&format!("<pre><code>{}</code></pre>\n", escape_html(code))),
        }
    }

    fn list<'i>(&mut self, items: impl IntoIterator<Item = (Option<String>, String, &'i str)>) {
        let mut any = false;
        for (anchor, code, doc) in items {
            if !any && self.format == PageFormat::Html {
                self.out.push_str("<ul>\n");
            }
            any = true;
            let doc = doc.split_whitespace().collect::<Vec<_>>().join(" ");
            match self.format {
                PageFormat::Markdown => {
                    self.out.push_str("- ");
                    if let Some(anchor) = &anchor {
                        self.out.push_str(&format!("<a id=\"{anchor}\"></a>"));
                    }
                    self.out.push_str(&format!("`{code}`"));
                    if !doc.is_empty() {
                        self.out.push_str(&format!(": {doc}"));
                    }
                    self.out.push('\n');
                }
                PageFormat::Html => {
                    match &anchor {
                        Some(anchor) => self
                            .out
                            .push_str(&format!("<li id=\"{}\">", escape_html(anchor))),
                        None => self.out.push_str("<li>"),
                    }
                    self.out
                        .push_str(&format!("<code>{}</code>", escape_html(&code)));
                    if !doc.is_empty() {
                        self.out.push_str(&format!(": {}", escape_html(&doc)));
                    }
                    self.out.push_str("</li>\n");
                }
            }
        }
        if any {
            match self.format {
                PageFormat::Markdown => self.out.push('\n'),
                PageFormat::Html => self.out.push_str("</ul>\n"),
            }
        }
    }

    fn finish(self, title: &str) -> String {
        match self.format {
            PageFormat::Markdown => {
                let mut out = self.out;
                let trimmed = out.trim_end().len();
                out.truncate(trimmed);
                out.push('\n');
                out
            }
            PageFormat::Html => format!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
                escape_html(title),
                self.out
            ),
        }
    }
}

/// Constant values and field defaults as compact JSON, strings unquoted
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}

fn field_signature(field: &IdlField) -> String {
    let requiredness = match field.required.as_str() {
        "required" => "required ",
        "optional" => "optional ",
        _ => "",
    };
    let default = field
        .default
        .as_ref()
        .map(|v| format!(" = {}", literal(v)))
        .unwrap_or_default();
    format!(
        "{}: {requiredness}{} {}{default}",
        field.key, field.type_id, field.name
    )
}

fn method_signature(function: &IdlFunction) -> String {
    let oneway = if function.oneway { "oneway " } else { "" };
    let arguments: Vec<String> = function.arguments.iter().map(field_signature).collect();
    let throws = if function.exceptions.is_empty() {
        String::new()
    } else {
        let exceptions: Vec<String> = function.exceptions.iter().map(field_signature).collect();
        format!(" throws ({})", exceptions.join(", "))
    };
    format!(
        "{oneway}{} {}({}){throws}",
        function.return_type_id,
        function.name,
        arguments.join(", ")
    )
}

fn struct_label(s: &IdlStruct) -> (&'static str, SymbolKind, SymbolKind) {
    if s.is_exception {
        ("exception", SymbolKind::Exception, SymbolKind::ExceptionField)
    } else if s.is_union {
        ("union", SymbolKind::Struct, SymbolKind::StructField)
    } else {
        ("struct", SymbolKind::Struct, SymbolKind::StructField)
    }
}

/// Generate the reference page of one module
pub fn module_page(module: &IdlModule, format: PageFormat) -> String {
    let name = &module.name;
    let mut page = PageWriter {
        format,
        out: String::new(),
    };

    page.title("Module", name, &anchor(SymbolKind::Module, name));
    page.doc(&module.doc);

    if !module.namespaces.is_empty() {
        page.section("Language mapping");
        page.list(
            module
                .namespaces
                .iter()
                .map(|(language, namespace)| (None, format!("{language}: {namespace}"), "")),
        );
    }

    if !module.constants.is_empty() {
        page.section("Constants");
        for constant in &module.constants {
            page.entry(
                "",
                &constant.name,
                &anchor(SymbolKind::Constant, &format!("{name}.{}", constant.name)),
            );
            let value = match &constant.value {
                Value::Null => String::new(),
                v => format!(" = {}", literal(v)),
            };
            page.signature(&format!("const {} {}{value}", constant.type_id, constant.name));
            page.doc(&constant.doc);
        }
    }

    if !module.typedefs.is_empty() {
        page.section("Type aliases");
        for typedef in &module.typedefs {
            page.entry(
                "",
                &typedef.name,
                &anchor(SymbolKind::Typedef, &format!("{name}.{}", typedef.name)),
            );
            page.signature(&format!("typedef {} {}", typedef.type_id, typedef.name));
            page.doc(&typedef.doc);
        }
    }

    if !module.enums.is_empty() {
        page.section("Enumerations");
        for e in &module.enums {
            let owner = format!("{name}.{}", e.name);
            page.entry("enum", &e.name, &anchor(SymbolKind::Enum, &owner));
            page.doc(&e.doc);
            page.list(e.members.iter().map(|member| {
                (
                    Some(anchor(
                        SymbolKind::EnumField,
                        &format!("{owner}.{}", member.name),
                    )),
                    format!("{} = {}", member.name, member.value),
                    member.doc.as_str(),
                )
            }));
        }
    }

    if !module.structs.is_empty() {
        page.section("Structs");
        for s in &module.structs {
            let (label, kind, field_kind) = struct_label(s);
            let owner = format!("{name}.{}", s.name);
            page.entry(label, &s.name, &anchor(kind, &owner));
            page.doc(&s.doc);
            page.list(s.fields.iter().map(|field| {
                (
                    Some(anchor(field_kind, &format!("{owner}.{}", field.name))),
                    field_signature(field),
                    field.doc.as_str(),
                )
            }));
        }
    }

    if !module.services.is_empty() {
        page.section("Services");
        for service in &module.services {
            let owner = format!("{name}.{}", service.name);
            page.entry("service", &service.name, &anchor(SymbolKind::Service, &owner));
            page.doc(&service.doc);
            page.list(service.functions.iter().map(|function| {
                (
                    Some(anchor(
                        SymbolKind::ServiceMethod,
                        &format!("{owner}.{}", function.name),
                    )),
                    method_signature(function),
                    function.doc.as_str(),
                )
            }));
        }
    }

    page.finish(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUTORIAL: &str = r#"{
      "name": "tutorial",
      "doc": "The first thing to know about are types.\n",
      "namespaces": { "java": "tutorial", "cpp": "tutorial" },
      "typedefs": [ { "name": "MyInteger", "typeId": "i32", "doc": "Pretty names.\n" } ],
      "enums": [
        { "name": "Operation", "members": [ { "name": "ADD", "value": 1 }, { "name": "SUBTRACT", "value": 2 } ] }
      ],
      "structs": [
        {
          "name": "Work",
          "isException": false,
          "isUnion": false,
          "fields": [
            { "key": 1, "name": "num1", "typeId": "i32", "required": "req_out", "default": 0 },
            { "key": 4, "name": "comment", "typeId": "string", "required": "optional", "doc": "Free text" }
          ]
        },
        { "name": "Choice", "isUnion": true, "fields": [] },
        {
          "name": "InvalidOperation",
          "isException": true,
          "fields": [ { "key": 1, "name": "why", "typeId": "string", "required": "required" } ]
        }
      ],
      "constants": [
        { "name": "INT32CONSTANT", "typeId": "i32", "value": 9853 },
        { "name": "GREETING", "typeId": "string", "value": "hello" }
      ],
      "services": [
        {
          "name": "Calculator",
          "doc": "Defining a\nservice.\n",
          "functions": [
            {
              "name": "calculate",
              "returnTypeId": "i32",
              "arguments": [
                { "key": 1, "name": "logid", "typeId": "i32", "required": "req_out" },
                { "key": 2, "name": "w", "typeId": "struct", "required": "req_out" }
              ],
              "exceptions": [ { "key": 1, "name": "ouch", "typeId": "exception", "required": "req_out" } ]
            },
            { "name": "zip", "doc": "Fire and forget.\n", "returnTypeId": "void", "oneway": true }
          ]
        }
      ]
    }"#;

    fn tutorial() -> IdlModule {
        serde_json::from_str(TUTORIAL).unwrap()
    }

    #[test]
    fn test_every_symbol_has_an_anchor() {
        let module = tutorial();
        for format in [PageFormat::Markdown, PageFormat::Html] {
            let page = module_page(&module, format);
            for symbol in module.symbols().unwrap() {
                let id = format!("id=\"{}\"", symbol.anchor());
                assert!(page.contains(&id), "{format:?} page lacks {id}");
            }
        }
    }

    #[test]
    fn test_markdown_page() {
        let page = module_page(&tutorial(), PageFormat::Markdown);
        insta::assert_snapshot!(page, @r#"
<a id="tutorial:module"></a>

# Module `tutorial`

The first thing to know about are types.

## Language mapping

- `cpp: tutorial`
- `java: tutorial`

## Constants

<a id="tutorial.INT32CONSTANT:constant"></a>

### `INT32CONSTANT`

`const i32 INT32CONSTANT = 9853`

<a id="tutorial.GREETING:constant"></a>

### `GREETING`

`const string GREETING = "hello"`

## Type aliases

<a id="tutorial.MyInteger:typedef"></a>

### `MyInteger`

`typedef i32 MyInteger`

Pretty names.

## Enumerations

<a id="tutorial.Operation:enum"></a>

### enum `Operation`

- <a id="tutorial.Operation.ADD:enum_field"></a>`ADD = 1`
- <a id="tutorial.Operation.SUBTRACT:enum_field"></a>`SUBTRACT = 2`

## Structs

<a id="tutorial.Work:struct"></a>

### struct `Work`

- <a id="tutorial.Work.num1:struct_field"></a>`1: i32 num1 = 0`
- <a id="tutorial.Work.comment:struct_field"></a>`4: optional string comment`: Free text

<a id="tutorial.Choice:struct"></a>

### union `Choice`

<a id="tutorial.InvalidOperation:exception"></a>

### exception `InvalidOperation`

- <a id="tutorial.InvalidOperation.why:exception_field"></a>`1: required string why`

## Services

<a id="tutorial.Calculator:service"></a>

### service `Calculator`

Defining a
service.

- <a id="tutorial.Calculator.calculate:service_method"></a>`i32 calculate(1: i32 logid, 2: struct w) throws (1: exception ouch)`
- <a id="tutorial.Calculator.zip:service_method"></a>`oneway void zip()`: Fire and forget.
"#);
    }

    #[test]
    fn test_html_page_escapes_and_wraps() {
        let mut module = tutorial();
        module.doc = "Types & <things>".to_string();
        let page = module_page(&module, PageFormat::Html);
        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<title>tutorial</title>"));
        assert!(page.contains("<h1 id=\"tutorial:module\">Module <code>tutorial</code></h1>"));
        assert!(page.contains("<p>Types &amp; &lt;things&gt;</p>"));
        assert!(page.contains(
            "<li id=\"tutorial.Operation.ADD:enum_field\"><code>ADD = 1</code></li>"
        ));
        assert!(page.contains("<pre><code>const string GREETING = &quot;hello&quot;</code></pre>"));
        assert!(page.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let module: IdlModule = serde_json::from_str(r#"{ "name": "bare" }"#).unwrap();
        assert_eq!(
            module_page(&module, PageFormat::Markdown),
            "<a id=\"bare:module\"></a>\n\n# Module `bare`\n"
        );
    }

    #[test]
    fn test_page_format_for_extension() {
        assert_eq!(PageFormat::for_extension(".html"), PageFormat::Html);
        assert_eq!(PageFormat::for_extension(".HTM"), PageFormat::Html);
        assert_eq!(PageFormat::for_extension("/"), PageFormat::Html);
        assert_eq!(PageFormat::for_extension(".md"), PageFormat::Markdown);
    }
}
