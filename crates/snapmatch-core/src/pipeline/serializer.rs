use super::{Next, SnapshotStage};
use crate::context::{Expected, Payload, SnapshotContext};
use crate::errors::Result;

/// Converts actual and expected values to snapshot text
///
/// The actual value is serialized before the inner stages run so they can
/// rely on its text; the expected value once they have produced it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerializerStage;

impl SnapshotStage for SerializerStage {
    fn name(&self) -> &'static str {
        "serializer"
    }

    fn process(&self, context: &mut SnapshotContext<'_>, next: Next<'_>) -> Result<bool> {
        let settings = context.settings();
        let (indent, grouped) = (settings.indent_output(), settings.is_grouped());

        if let Payload::Value(value) = context.actual() {
            let value = value.clone();
            let text = value.to_snapshot_text(indent, grouped)?;
            context.set_actual(Payload::Serialized { value, text });
        }

        if !next.run(context)? {
            return Ok(false);
        }

        if let Expected::Known(Payload::Value(value)) = context.expected_state() {
            let value = value.clone();
            let text = value.to_snapshot_text(indent, grouped)?;
            context.set_expected(Payload::Serialized { value, text });
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use crate::settings::SettingsBuilder;
    use crate::value::SnapshotValue;

    #[test]
    fn test_serializes_actual_and_expected() {
        let settings = SettingsBuilder::new()
            .snapshot_name("Ser")
            .indent_output(false)
            .build()
            .unwrap();
        let actual = SnapshotValue::parse(r#"{"b":1,"a":2}"#).unwrap();
        let mut ctx = SnapshotContext::new(&settings, actual);

        let pipeline = Pipeline::new()
            .use_fn("reader", |ctx| {
                assert!(ctx.actual().is_serialized());
                ctx.set_expected(Payload::Value(SnapshotValue::from("hello")));
                Ok(true)
            })
            .use_stage(SerializerStage);

        assert!(pipeline.process(&mut ctx).unwrap());
        assert_eq!(ctx.actual().text().unwrap(), r#"{"a":2,"b":1}"#);
        assert_eq!(ctx.expected().unwrap().text().unwrap(), "hello");
    }

    #[test]
    fn test_grouped_string_is_json_encoded() {
        let settings = SettingsBuilder::new()
            .snapshot_name("Ser")
            .group_key("G")
            .build()
            .unwrap();
        let mut ctx = SnapshotContext::new(&settings, SnapshotValue::from("hi"));

        Pipeline::new()
            .use_stage(SerializerStage)
            .process(&mut ctx)
            .unwrap();
        assert_eq!(ctx.actual().text().unwrap(), "\"hi\"");
    }

    #[test]
    fn test_expected_left_alone_when_inner_fails() {
        let settings = SettingsBuilder::new().snapshot_name("Ser").build().unwrap();
        let mut ctx = SnapshotContext::new(&settings, SnapshotValue::Null);

        let ok = Pipeline::new()
            .use_fn("reader", |ctx| {
                ctx.set_expected(Payload::Value(SnapshotValue::from(1i64)));
                Ok(false)
            })
            .use_stage(SerializerStage)
            .process(&mut ctx)
            .unwrap();

        assert!(!ok);
        assert!(!ctx.expected().unwrap().is_serialized());
    }
}
