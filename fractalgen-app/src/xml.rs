//! Small typed accessors over `roxmltree` nodes shared by the preset and
//! batch readers.
//!
//! A "value" is looked up first as an attribute and then as the text of a
//! child element with the same name, so `<size width="64"/>` and
//! `<size><width>64</width></size>` read the same.
//!
//! Preset and batch documents may list their elements at the top level
//! without a single enclosing root; [`wrap_fragment`] makes such text
//! parseable and [`elements`] finds the elements in either layout.

use std::str::FromStr;

use roxmltree::Node;

use fractalgen_core::Complex;

use crate::error::AppError;

/// Synthetic root placed around document text by [`wrap_fragment`].
const FRAGMENT_ROOT: &str = "fragment";

/// Drop a leading `<?xml …?>` declaration and wrap the rest in a synthetic
/// root element, so text with several top-level elements parses.
pub fn wrap_fragment(text: &str) -> String {
    let body = text.trim_start_matches('\u{feff}').trim_start();
    let body = match body.strip_prefix("<?xml") {
        Some(rest) => rest.find("?>").map_or(rest, |end| &rest[end + 2..]),
        None => body,
    };
    format!("<{FRAGMENT_ROOT}>{body}</{FRAGMENT_ROOT}>")
}

/// Elements named `name` of a wrapped document: those at the top level and
/// those one level down inside a container element.
pub fn elements<'a, 'input>(root: Node<'a, 'input>, name: &str) -> Vec<Node<'a, 'input>> {
    let mut found = Vec::new();
    for top in root.children().filter(Node::is_element) {
        if top.has_tag_name(name) {
            found.push(top);
        } else {
            found.extend(top.children().filter(|n| n.has_tag_name(name)));
        }
    }
    found
}

pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// Like [`child`], but a missing element is an error.
pub fn require_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> crate::Result<Node<'a, 'input>> {
    child(node, name).ok_or_else(|| AppError::MissingElement {
        parent: node.tag_name().name().to_string(),
        element: name.to_string(),
    })
}

pub fn value<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
        .or_else(|| child(node, name).and_then(|c| c.text()))
        .map(str::trim)
}

pub fn require_value<'a>(node: Node<'a, '_>, name: &str) -> crate::Result<&'a str> {
    value(node, name).ok_or_else(|| AppError::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute: name.to_string(),
    })
}

fn parse<T: FromStr>(name: &str, raw: &str, expected: &'static str) -> crate::Result<T> {
    raw.parse().map_err(|_| AppError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
        expected,
    })
}

pub fn f64_value(node: Node<'_, '_>, name: &str) -> crate::Result<Option<f64>> {
    value(node, name)
        .map(|raw| parse(name, raw, "a number"))
        .transpose()
}

pub fn u32_value(node: Node<'_, '_>, name: &str) -> crate::Result<Option<u32>> {
    value(node, name)
        .map(|raw| parse(name, raw, "a non-negative integer"))
        .transpose()
}

/// Accepts `true`/`false`, `yes`/`no` and `1`/`0`, case-insensitively.
pub fn bool_value(node: Node<'_, '_>, name: &str) -> crate::Result<Option<bool>> {
    value(node, name)
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(AppError::InvalidValue {
                name: name.to_string(),
                value: raw.to_string(),
                expected: "a boolean",
            }),
        })
        .transpose()
}

/// Parse a packed `0xRRGGBB` color written as `0x…`, `#…` or decimal.
pub fn parse_rgb(name: &str, raw: &str) -> crate::Result<u32> {
    let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(hex) = raw.strip_prefix('#') {
        u32::from_str_radix(hex, 16)
    } else {
        raw.parse()
    };
    match parsed {
        Ok(rgb) if rgb <= 0xff_ffff => Ok(rgb),
        _ => Err(AppError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
            expected: "a packed RGB color (0xRRGGBB, #RRGGBB or decimal)",
        }),
    }
}

pub fn require_rgb(node: Node<'_, '_>, name: &str) -> crate::Result<u32> {
    parse_rgb(name, require_value(node, name)?)
}

/// Read a complex number from `real`/`imag` (or `x`/`y`) values.
/// A missing node or missing component reads as zero.
pub fn complex(node: Option<Node<'_, '_>>) -> crate::Result<Complex> {
    let Some(node) = node else {
        return Ok(Complex::ZERO);
    };
    let re = match f64_value(node, "real")? {
        Some(re) => re,
        None => f64_value(node, "x")?.unwrap_or(0.0),
    };
    let im = match f64_value(node, "imag")? {
        Some(im) => im,
        None => f64_value(node, "y")?.unwrap_or(0.0),
    };
    Ok(Complex::new(re, im))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn value_reads_attribute_then_child_text() {
        let doc = Document::parse(r#"<n a="1"><b> 2 </b><a>ignored</a></n>"#).unwrap();
        let root = doc.root_element();
        assert_eq!(value(root, "a"), Some("1"));
        assert_eq!(value(root, "b"), Some("2"));
        assert_eq!(value(root, "c"), None);
    }

    #[test]
    fn typed_values() {
        let doc = Document::parse(r#"<n w="64" z="2.5" m="YES" bad="x"/>"#).unwrap();
        let n = doc.root_element();
        assert_eq!(u32_value(n, "w").unwrap(), Some(64));
        assert_eq!(f64_value(n, "z").unwrap(), Some(2.5));
        assert_eq!(bool_value(n, "m").unwrap(), Some(true));
        assert_eq!(f64_value(n, "missing").unwrap(), None);
        assert!(matches!(
            u32_value(n, "bad"),
            Err(AppError::InvalidValue { .. })
        ));
        assert!(bool_value(n, "bad").is_err());
    }

    #[test]
    fn rgb_notations() {
        assert_eq!(parse_rgb("c", "0xFF8000").unwrap(), 0xff8000);
        assert_eq!(parse_rgb("c", "#00ff00").unwrap(), 0x00ff00);
        assert_eq!(parse_rgb("c", "255").unwrap(), 0x0000ff);
        assert!(parse_rgb("c", "0x1000000").is_err());
        assert!(parse_rgb("c", "red").is_err());
    }

    #[test]
    fn complex_from_either_naming() {
        let doc = Document::parse(r#"<r><a real="-0.5" imag="0.25"/><b x="1" y="-1"/><c imag="3"/></r>"#)
            .unwrap();
        let root = doc.root_element();
        assert_eq!(complex(child(root, "a")).unwrap(), Complex::new(-0.5, 0.25));
        assert_eq!(complex(child(root, "b")).unwrap(), Complex::new(1.0, -1.0));
        assert_eq!(complex(child(root, "c")).unwrap(), Complex::new(0.0, 3.0));
        assert_eq!(complex(child(root, "missing")).unwrap(), Complex::ZERO);
    }

    #[test]
    fn fragment_accepts_several_top_level_elements() {
        let text = "<?xml version=\"1.0\"?>\n<item n=\"1\"/>\n<item n=\"2\"/>";
        let wrapped = wrap_fragment(text);
        let doc = Document::parse(&wrapped).unwrap();
        let items = elements(doc.root_element(), "item");
        let ns: Vec<_> = items.iter().map(|n| n.attribute("n").unwrap()).collect();
        assert_eq!(ns, vec!["1", "2"]);
    }

    #[test]
    fn elements_looks_inside_containers() {
        let wrapped = wrap_fragment("<list><item/><other/><item/></list><item/>");
        let doc = Document::parse(&wrapped).unwrap();
        assert_eq!(elements(doc.root_element(), "item").len(), 3);
    }

    #[test]
    fn missing_required_pieces() {
        let doc = Document::parse(r#"<fractal/>"#).unwrap();
        let n = doc.root_element();
        assert!(matches!(
            require_child(n, "size"),
            Err(AppError::MissingElement { .. })
        ));
        assert!(matches!(
            require_value(n, "save"),
            Err(AppError::MissingAttribute { .. })
        ));
    }
}
