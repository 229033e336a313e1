//! Name → implementation table, built once at startup.
//!
//! Every builtin is registered under the SQL name hosts call it by, with
//! capability metadata the host needs to register it (kind, determinism,
//! minimum arity).

use std::collections::BTreeMap;
use std::fmt;

use jpack_codec::Codec;
use jpack_core::config::PackConfig;
use jpack_core::{Error, Value};

use crate::host::{HostContext, OperatorArgs};
use crate::igroup::IGroup;
use crate::stream::RowStream;
use crate::table::FrameSource;
use crate::traits::{OpError, RowSource, StreamingOperator};

pub type ScalarFn = fn(&Codec, &[Value]) -> Result<Value, Error>;
pub type TableFn = fn(&Codec, &[Value]) -> Result<Box<dyn RowSource>, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// One value per call.
    Scalar,
    /// Schema-first rows from the call arguments alone.
    Table,
    /// Schema-first rows from a host sub-cursor; takes named arguments.
    Operator,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            FunctionKind::Scalar => "scalar",
            FunctionKind::Table => "table",
            FunctionKind::Operator => "operator",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub kind: FunctionKind,
    pub deterministic: bool,
    pub min_args: usize,
    pub summary: &'static str,
}

enum Implementation {
    Scalar(ScalarFn),
    Table(TableFn),
    Operator(Box<dyn StreamingOperator>),
}

pub struct Entry {
    name: &'static str,
    caps: Capabilities,
    imp: Implementation,
}

impl Entry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }
}

pub struct Registry {
    codec: Codec,
    entries: BTreeMap<&'static str, Entry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_codec(Codec::default())
    }

    /// Registry with every builtin, sharing one codec configured by `cfg`.
    /// Fails if `cfg` does not validate.
    pub fn with_config(cfg: PackConfig) -> Result<Self, OpError> {
        Ok(Self::with_codec(Codec::new(cfg)?))
    }

    fn with_codec(codec: Codec) -> Self {
        let estimated_rows = codec.config().estimated_rows;
        let mut reg = Self {
            codec,
            entries: BTreeMap::new(),
        };

        reg.register_scalar("jpack", 0, "pack arguments, keeping nested packs nested", jpack);
        reg.register_scalar("jmerge", 0, "concatenate packs", jmerge);
        reg.register_scalar("jset", 0, "sorted, deduplicated union of packs", jset);
        reg.register_scalar("jsort", 0, "sort the elements of packs", jsort);
        reg.register_scalar("jfilterempty", 0, "drop empty text, empty packs and nulls", jfilterempty);
        reg.register_scalar("jflatten", 0, "flatten all nested packs", jflatten);
        reg.register_scalar("jmergeregexp", 0, "alternation regex over text elements", jmergeregexp);
        reg.register_scalar("j2t", 0, "pack to tab-separated text", j2t);
        reg.register_scalar("t2j", 0, "tab-separated text to a pack of text", t2j);
        reg.register_scalar("jdictkeys", 0, "keys of dictionary packs", jdictkeys);
        reg.register_scalar("jdictvals", 1, "values of a dictionary pack", jdictvals);

        reg.register_table("jsplitv", 0, "one row per pack element", jsplitv);
        reg.register_table("jsplit", 0, "one column per pack element", jsplit);
        reg.register_table("jdictsplit", 1, "one column per dictionary key", jdictsplit);

        reg.register_operator(
            Box::new(IGroup { estimated_rows }),
            "pass a query through, claiming host ordering",
        );
        reg
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn register_scalar(
        &mut self,
        name: &'static str,
        min_args: usize,
        summary: &'static str,
        f: ScalarFn,
    ) {
        self.insert(name, FunctionKind::Scalar, min_args, summary, Implementation::Scalar(f));
    }

    pub fn register_table(
        &mut self,
        name: &'static str,
        min_args: usize,
        summary: &'static str,
        f: TableFn,
    ) {
        self.insert(name, FunctionKind::Table, min_args, summary, Implementation::Table(f));
    }

    pub fn register_operator(&mut self, op: Box<dyn StreamingOperator>, summary: &'static str) {
        let name = op.name();
        self.insert(name, FunctionKind::Operator, 0, summary, Implementation::Operator(op));
    }

    fn insert(
        &mut self,
        name: &'static str,
        kind: FunctionKind,
        min_args: usize,
        summary: &'static str,
        imp: Implementation,
    ) {
        let caps = Capabilities {
            kind,
            // Everything shipped here is a pure function of its input except
            // operators, whose rows depend on the host's data.
            deterministic: kind != FunctionKind::Operator,
            min_args,
            summary,
        };
        if self.entries.insert(name, Entry { name, caps, imp }).is_some() {
            tracing::warn!(name, "registry entry replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn call_scalar(&self, name: &str, args: &[Value]) -> Result<Value, OpError> {
        let entry = self.lookup(name, args.len())?;
        match &entry.imp {
            Implementation::Scalar(f) => Ok(f(&self.codec, args)?),
            _ => Err(wrong_kind(entry, FunctionKind::Scalar)),
        }
    }

    pub fn open_table(&self, name: &str, args: &[Value]) -> Result<RowStream, OpError> {
        let entry = self.lookup(name, args.len())?;
        match &entry.imp {
            Implementation::Table(f) => Ok(RowStream::new(entry.name, f(&self.codec, args)?)),
            _ => Err(wrong_kind(entry, FunctionKind::Table)),
        }
    }

    pub fn operator(&self, name: &str) -> Result<&dyn StreamingOperator, OpError> {
        let entry = self.lookup(name, 0)?;
        match &entry.imp {
            Implementation::Operator(op) => Ok(op.as_ref()),
            _ => Err(wrong_kind(entry, FunctionKind::Operator)),
        }
    }

    /// Open whatever `name` is as a row stream: table functions take the
    /// positional arguments, operators additionally get the host context.
    pub fn open_rows(
        &self,
        name: &str,
        args: &OperatorArgs,
        ctx: &HostContext<'_>,
    ) -> Result<RowStream, OpError> {
        match self.get(name).map(|e| e.caps.kind) {
            Some(FunctionKind::Operator) => self.operator(name)?.open(args, ctx),
            _ => self.open_table(name, &args.positional),
        }
    }

    fn lookup(&self, name: &str, argc: usize) -> Result<&Entry, OpError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| OpError::UnknownFunction(name.to_string()))?;
        if argc < entry.caps.min_args {
            return Err(OpError::Arity {
                name: name.to_string(),
                min: entry.caps.min_args,
                got: argc,
            });
        }
        Ok(entry)
    }
}

fn wrong_kind(entry: &Entry, expected: FunctionKind) -> OpError {
    OpError::WrongKind {
        name: entry.name.to_string(),
        expected,
        actual: entry.caps.kind,
    }
}

fn jpack(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(c.pack(args)?.into())
}

fn jmerge(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(c.merge(args)?.into())
}

fn jset(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(c.setify(args)?.into())
}

fn jsort(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(c.sortify(args)?.into())
}

fn jfilterempty(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(c.filter_empty(args)?.into())
}

fn jflatten(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(c.flatten(args)?.into())
}

fn jmergeregexp(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(Value::Text(c.merge_regex(args)?))
}

fn j2t(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(Value::Text(c.to_tabular(args)?))
}

fn t2j(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(c.from_tabular(args).into())
}

fn jdictkeys(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    Ok(c.dict_keys(args)?.into())
}

fn jdictvals(c: &Codec, args: &[Value]) -> Result<Value, Error> {
    c.dict_values(args)
}

fn jsplitv(c: &Codec, args: &[Value]) -> Result<Box<dyn RowSource>, Error> {
    Ok(Box::new(FrameSource::new("jsplitv", c.split_vertical(args)?)))
}

fn jsplit(c: &Codec, args: &[Value]) -> Result<Box<dyn RowSource>, Error> {
    Ok(Box::new(FrameSource::new("jsplit", c.split_horizontal(args)?)))
}

fn jdictsplit(c: &Codec, args: &[Value]) -> Result<Box<dyn RowSource>, Error> {
    Ok(Box::new(FrameSource::new("jdictsplit", c.dict_split(args)?)))
}
