//! Shared fixtures for integration tests
//!
//! Type layout:
//!
//! ```text
//! @Id, @Ignore                     annotation types
//! Polite        { thank }          interface
//! Greeter : Polite { greet }       interface
//! Named         { getName }        interface
//! Creature      { species @Id }    class, method breathe
//! Villager : Creature, Named, Greeter
//! ```

#![allow(dead_code)]

use class_inspector::{
    ClassBuilder, ClassRef, ConstructorDefinition, FieldDefinition, MethodDefinition, Reflect,
    TypeInfo, Value,
};
use once_cell::sync::Lazy;

pub static ID: Lazy<ClassRef> = Lazy::new(|| ClassBuilder::annotation("test.Id").build().unwrap());

pub static IGNORE: Lazy<ClassRef> =
    Lazy::new(|| ClassBuilder::annotation("test.Ignore").build().unwrap());

pub static POLITE: Lazy<ClassRef> = Lazy::new(|| {
    ClassBuilder::interface("test.Polite")
        .method(MethodDefinition::new("thank").as_abstract())
        .build()
        .unwrap()
});

pub static GREETER: Lazy<ClassRef> = Lazy::new(|| {
    ClassBuilder::interface("test.Greeter")
        .implements(&POLITE)
        .method(MethodDefinition::new("greet").as_abstract())
        .method(
            MethodDefinition::new("greet")
                .param("whom", TypeInfo::String)
                .as_abstract(),
        )
        .build()
        .unwrap()
});

pub static NAMED: Lazy<ClassRef> = Lazy::new(|| {
    ClassBuilder::interface("test.Named")
        .method(
            MethodDefinition::new("getName")
                .returns(TypeInfo::String)
                .as_abstract(),
        )
        .build()
        .unwrap()
});

pub static CREATURE: Lazy<ClassRef> = Lazy::new(|| {
    ClassBuilder::class("test.Creature")
        .field(FieldDefinition::new("species", TypeInfo::String).annotated(&ID))
        .method(MethodDefinition::new("breathe"))
        .constructor(ConstructorDefinition::new(|_| Ok(Creature)))
        .build()
        .unwrap()
});

/// Superclass payload
#[derive(Debug)]
pub struct Creature;

impl Reflect for Creature {
    fn class() -> ClassRef {
        CREATURE.clone()
    }
}

/// Subject of most tests
#[derive(Debug, Default, PartialEq)]
pub struct Villager {
    pub name: String,
    pub description: String,
    pub age: i64,
    pub mentor: Option<String>,
}

fn string_arg(args: &[Value], index: usize) -> String {
    args.get(index)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub static VILLAGER: Lazy<ClassRef> = Lazy::new(|| {
    ClassBuilder::class("test.Villager")
        .extends(&CREATURE)
        .implements(&NAMED)
        .implements(&GREETER)
        .field(
            FieldDefinition::new("name", TypeInfo::String)
                .annotated(&ID)
                .private(),
        )
        .field(FieldDefinition::new("description", TypeInfo::String).annotated(&IGNORE))
        .field(
            FieldDefinition::new("age", TypeInfo::int())
                .annotated(&ID)
                .annotated(&IGNORE),
        )
        .field(FieldDefinition::new("mentor", TypeInfo::class(&CREATURE)))
        .method(MethodDefinition::new("getName").returns(TypeInfo::String))
        .method(MethodDefinition::new("greet"))
        .method(MethodDefinition::new("describe").returns(TypeInfo::String))
        .method(
            MethodDefinition::new("describe")
                .param("verbose", TypeInfo::boolean())
                .returns(TypeInfo::String),
        )
        .method(MethodDefinition::new("secretHandshake").private())
        .constructor(ConstructorDefinition::new(|_| Ok(Villager::default())).private())
        .constructor(
            ConstructorDefinition::new(|args| {
                Ok(Villager {
                    name: string_arg(args, 0),
                    description: string_arg(args, 1),
                    ..Villager::default()
                })
            })
            .param("name", TypeInfo::String)
            .param("description", TypeInfo::String)
            .private(),
        )
        .constructor(
            ConstructorDefinition::new(|args| {
                Ok(Villager {
                    age: args[0].as_i64().unwrap_or_default(),
                    ..Villager::default()
                })
            })
            .param("age", TypeInfo::long())
            .protected(),
        )
        .constructor(
            ConstructorDefinition::new(|args| {
                let mentor = args[0]
                    .as_object()
                    .map(|instance| instance.class().name().to_string());
                Ok(Villager {
                    mentor,
                    ..Villager::default()
                })
            })
            .param("mentor", TypeInfo::class(&CREATURE)),
        )
        .build()
        .unwrap()
});

impl Reflect for Villager {
    fn class() -> ClassRef {
        VILLAGER.clone()
    }
}

/// Error raised by a failing constructor body
#[derive(Debug, thiserror::Error)]
#[error("the forge is cold")]
pub struct ForgeError;

pub static BROKEN: Lazy<ClassRef> = Lazy::new(|| {
    ClassBuilder::class("test.Broken")
        .constructor(
            ConstructorDefinition::new(|_| -> anyhow::Result<()> { Err(ForgeError.into()) })
                .private(),
        )
        .build()
        .unwrap()
});

/// Marker payloads recording which constructor ran
#[derive(Debug, PartialEq)]
pub enum Picked {
    First,
    Second,
}

/// Two constructors both accepting a single string; declaration order decides
pub static AMBIGUOUS: Lazy<ClassRef> = Lazy::new(|| {
    ClassBuilder::class("test.Ambiguous")
        .constructor(
            ConstructorDefinition::new(|_| Ok(Picked::First)).param("value", TypeInfo::Object),
        )
        .constructor(
            ConstructorDefinition::new(|_| Ok(Picked::Second))
                .param("value", TypeInfo::String)
                .private(),
        )
        .build()
        .unwrap()
});

/// Install a test subscriber; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
