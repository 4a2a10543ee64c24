// plugin-tooling - core/yaml.rs
//
// Minimal block-style YAML emitter for meta documents.
// Core layer: writes to any Write trait object.
//
// Layout matches what the engine itself writes:
//   - two spaces per nesting level
//   - sequence items sit at the same column as their parent key
//   - a mapping inside a sequence starts on the hyphen line (`- first:`)
//   - empty containers are written inline as `{}` / `[]`
//
// Strings are written verbatim. Producers must not emit values containing
// YAML structural characters.

use crate::core::value::{Mapping, Value};
use crate::util::error::RenderError;
use std::io::Write;

const INDENT: &str = "  ";

/// Render `value` as a complete document into `sink`.
///
/// The root must be a non-empty mapping or sequence.
pub fn render<W: Write>(value: &Value, sink: &mut W) -> Result<(), RenderError> {
    let mut emitter = Emitter { sink };
    match value {
        Value::Mapping(m) if m.is_empty() => Err(RenderError::EmptyRoot { kind: "mapping" }),
        Value::Sequence(s) if s.is_empty() => Err(RenderError::EmptyRoot { kind: "sequence" }),
        Value::Mapping(m) => emitter.mapping(m, 0, false),
        Value::Sequence(s) => emitter.sequence(s, 0, false),
        other => Err(RenderError::ScalarRoot { kind: other.kind() }),
    }
}

/// Render `value` into a freshly allocated string.
pub fn render_to_string(value: &Value) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    render(value, &mut buf)?;
    // The emitter only writes UTF-8 fragments.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

struct Emitter<'w, W: Write> {
    sink: &'w mut W,
}

impl<W: Write> Emitter<'_, W> {
    fn indent(&mut self, level: usize) -> Result<(), RenderError> {
        for _ in 0..level {
            self.sink.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }

    /// Keys are written at `level`. With `inline_first` the first key
    /// continues the current line (after a sequence hyphen).
    fn mapping(&mut self, map: &Mapping, level: usize, inline_first: bool) -> Result<(), RenderError> {
        for (i, (key, value)) in map.iter().enumerate() {
            if i == 0 && inline_first {
                write!(self.sink, " {key}:")?;
            } else {
                self.indent(level)?;
                write!(self.sink, "{key}:")?;
            }
            self.value(value, level, false)?;
        }
        Ok(())
    }

    /// Hyphens are written at `level`, i.e. the column of the owning key.
    fn sequence(&mut self, items: &[Value], level: usize, inline_first: bool) -> Result<(), RenderError> {
        for (i, item) in items.iter().enumerate() {
            if i == 0 && inline_first {
                self.sink.write_all(b" -")?;
            } else {
                self.indent(level)?;
                self.sink.write_all(b"-")?;
            }
            self.value(item, level, true)?;
        }
        Ok(())
    }

    /// Write the remainder of a line that already holds `key:` or `-`.
    fn value(&mut self, value: &Value, level: usize, in_sequence: bool) -> Result<(), RenderError> {
        match value {
            Value::Null => writeln!(self.sink)?,
            Value::Bool(b) => writeln!(self.sink, " {b}")?,
            Value::Int(i) => writeln!(self.sink, " {i}")?,
            Value::Float(f) => writeln!(self.sink, " {}", format_float(*f))?,
            Value::Str(s) => writeln!(self.sink, " {s}")?,
            Value::Mapping(m) if m.is_empty() => writeln!(self.sink, " {{}}")?,
            Value::Sequence(s) if s.is_empty() => writeln!(self.sink, " []")?,
            Value::Mapping(m) => {
                if !in_sequence {
                    writeln!(self.sink)?;
                }
                self.mapping(m, level + 1, in_sequence)?;
            }
            Value::Sequence(s) => {
                if in_sequence {
                    self.sequence(s, level + 1, true)?;
                } else {
                    writeln!(self.sink)?;
                    self.sequence(s, level, false)?;
                }
            }
        }
        Ok(())
    }
}

/// Integral floats keep a `.0` so they read back as floats. Non-finite
/// values use the YAML core-schema spellings.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { ".inf" } else { "-.inf" }.to_string()
    } else if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn render_str(value: impl Into<Value>) -> String {
        render_to_string(&value.into()).expect("render")
    }

    #[test]
    fn test_empty_containers_and_scalar_sequence() {
        let doc = Mapping::new()
            .with("a", Mapping::new())
            .with("b", vec![Value::from(1), Value::from(2)]);
        assert_eq!(render_str(doc), "a: {}\nb:\n- 1\n- 2\n");
    }

    #[test]
    fn test_scalars() {
        let doc = Mapping::new()
            .with("yes", true)
            .with("no", false)
            .with("nothing", Value::Null)
            .with("count", 3)
            .with("ratio", 0.5)
            .with("whole", 2.0)
            .with("name", "Win64")
            .with("list", Vec::<Value>::new());
        assert_eq!(
            render_str(doc),
            "yes: true\nno: false\nnothing:\ncount: 3\nratio: 0.5\nwhole: 2.0\nname: Win64\nlist: []\n"
        );
    }

    #[test]
    fn test_non_finite_floats() {
        let doc = Mapping::new()
            .with("nan", f64::NAN)
            .with("up", f64::INFINITY)
            .with("down", f64::NEG_INFINITY)
            .with("tiny", -0.125);
        assert_eq!(
            render_str(doc),
            "nan: .nan\nup: .inf\ndown: -.inf\ntiny: -0.125\n"
        );
    }

    #[test]
    fn test_nested_mapping_indentation() {
        let doc = Mapping::new().with(
            "PluginImporter",
            Mapping::new()
                .with("serializedVersion", 2)
                .with("iconMap", Mapping::new())
                .with("inner", Mapping::new().with("deep", "x")),
        );
        assert_eq!(
            render_str(doc),
            "PluginImporter:\n  serializedVersion: 2\n  iconMap: {}\n  inner:\n    deep: x\n"
        );
    }

    #[test]
    fn test_mapping_in_sequence_starts_on_hyphen_line() {
        let descriptor = Mapping::new()
            .with("first", Mapping::new().with("", "Any"))
            .with(
                "second",
                Mapping::new()
                    .with("enabled", 0)
                    .with("settings", Mapping::new().with("Exclude Win", 1)),
            );
        let doc = Mapping::new().with(
            "importer",
            Mapping::new().with("platformData", vec![Value::from(descriptor)]),
        );
        let expected = "\
importer:
  platformData:
  - first:
      : Any
    second:
      enabled: 0
      settings:
        Exclude Win: 1
";
        assert_eq!(render_str(doc), expected);
    }

    #[test]
    fn test_null_and_empty_items_in_sequence() {
        let doc = Mapping::new().with(
            "items",
            vec![Value::Null, Value::from(Mapping::new()), Value::from(Vec::<Value>::new())],
        );
        assert_eq!(render_str(doc), "items:\n-\n- {}\n- []\n");
    }

    #[test]
    fn test_nested_sequences() {
        let inner = vec![Value::from("x"), Value::from("y")];
        let doc = Mapping::new().with("grid", vec![Value::from(inner), Value::from("z")]);
        assert_eq!(render_str(doc), "grid:\n- - x\n  - y\n- z\n");
    }

    #[test]
    fn test_top_level_sequence() {
        let doc = vec![Value::from(Mapping::new().with("a", 1).with("b", 2)), Value::from(3)];
        assert_eq!(render_str(doc), "- a: 1\n  b: 2\n- 3\n");
    }

    #[test]
    fn test_rejects_empty_root() {
        let err = render_to_string(&Value::from(Mapping::new())).unwrap_err();
        assert!(matches!(err, RenderError::EmptyRoot { kind: "mapping" }));
        let err = render_to_string(&Value::from(Vec::<Value>::new())).unwrap_err();
        assert!(matches!(err, RenderError::EmptyRoot { kind: "sequence" }));
    }

    #[test]
    fn test_rejects_scalar_root() {
        let err = render_to_string(&Value::from("plain")).unwrap_err();
        assert!(matches!(err, RenderError::ScalarRoot { kind: "string" }));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let doc = Value::from(Mapping::new().with("a", 1));
        let err = render(&doc, &mut FailingSink).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
