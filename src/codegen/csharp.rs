//! C# loader classes for the game runtime.
//!
//! Every table becomes a `sealed class` implementing `ICELoader`; the dispatch
//! helper `CEHashHelper` creates a loader from the hash of its table name.

use crate::codegen::CodegenError;
use crate::codegen::DispatchEntry;
use crate::codegen::Emitter;
use crate::codegen::TableSchema;
use crate::database::column::ColumnType;
use std::fmt::Write;

const BANNER: &str = "\
//////////////////////////////////////////////////////////////////////////
/// This is an auto-generated script, please do not modify it manually ///
//////////////////////////////////////////////////////////////////////////
";

const DISPATCH_CLASS: &str = "CEHashHelper";

#[derive(Debug, Default, Clone, Copy)]
pub struct CSharpEmitter;

impl CSharpEmitter {
    pub fn new() -> Self {
        CSharpEmitter
    }

    /// `CEConvertHelper` call that reads a field out of the runtime's hashtable.
    fn converter(kind: &ColumnType) -> Option<&'static str> {
        match kind {
            ColumnType::Int => Some("O2I"),
            ColumnType::String => Some("O2STrim"),
            ColumnType::Float => Some("O2F"),
            ColumnType::Unsupported(_) => None,
        }
    }

    fn write_accessors(output: &mut String, schema: &TableSchema) -> Result<(), CodegenError> {
        let (key, suffix) = match schema.key_type {
            ColumnType::Int => ("int", "Int"),
            ColumnType::String => ("string", "String"),
            _ => return Ok(()),
        };
        let name = &schema.name;
        writeln!(output)?;
        writeln!(output, "    public static {name} GetElement({key} elementKey)")?;
        writeln!(output, "    {{")?;
        writeln!(output, "        return CEManager.instance.GetElement{suffix}(CEName, elementKey) as {name};")?;
        writeln!(output, "    }}")?;
        writeln!(output)?;
        writeln!(output, "    public static Dictionary<{key}, ICELoader> GetElementDict()")?;
        writeln!(output, "    {{")?;
        writeln!(output, "        return CEManager.instance.GetDict{suffix}(CEName);")?;
        writeln!(output, "    }}")?;
        Ok(())
    }
}

impl Emitter for CSharpEmitter {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn file_extension(&self) -> &'static str {
        "cs"
    }

    fn dispatch_file_name(&self) -> String {
        format!("{DISPATCH_CLASS}.{}", self.file_extension())
    }

    fn emit_table(&self, schema: &TableSchema) -> Result<String, CodegenError> {
        let name = &schema.name;
        let mut output = String::from(BANNER);
        writeln!(output)?;
        writeln!(output, "using System.Text;")?;
        writeln!(output, "using System.Collections;")?;
        writeln!(output, "using System.Collections.Generic;")?;
        writeln!(output, "using CE;")?;
        writeln!(output)?;
        writeln!(output, "public sealed class {name} : ICELoader")?;
        writeln!(output, "{{")?;
        writeln!(output, "    public static readonly string CEName = \"{name}\";")?;
        writeln!(output)?;
        for field in &schema.fields {
            writeln!(output, "    public {} {} {{ get; private set; }}", field.kind, field.name)?;
        }

        writeln!(output)?;
        writeln!(output, "    public void Load(Hashtable ht)")?;
        writeln!(output, "    {{")?;
        for field in &schema.fields {
            if let Some(converter) = Self::converter(&field.kind) {
                writeln!(output, "        {0} = CEConvertHelper.{converter}(ht[\"{0}\"]);", field.name)?;
            }
        }
        writeln!(output, "    }}")?;

        Self::write_accessors(&mut output, schema)?;

        writeln!(output)?;
        writeln!(output, "    public {name} Clone()")?;
        writeln!(output, "    {{")?;
        writeln!(output, "        var clone = new {name}();")?;
        for field in &schema.fields {
            writeln!(output, "        clone.{0} = {0};", field.name)?;
        }
        writeln!(output, "        return clone;")?;
        writeln!(output, "    }}")?;

        writeln!(output)?;
        writeln!(output, "    public override string ToString()")?;
        writeln!(output, "    {{")?;
        writeln!(output, "        var sb = new StringBuilder();")?;
        writeln!(output, "        sb.Append(CEName).Append(\"->\");")?;
        writeln!(output, "        sb.AppendLine();")?;
        for field in &schema.fields {
            writeln!(output, "        sb.Append(\"{0}: \").Append({0});", field.name)?;
            writeln!(output, "        sb.AppendLine();")?;
        }
        writeln!(output, "        return sb.ToString();")?;
        writeln!(output, "    }}")?;
        writeln!(output, "}}")?;
        Ok(output)
    }

    fn emit_dispatch(&self, entries: &[DispatchEntry]) -> Result<String, CodegenError> {
        let mut output = String::from(BANNER);
        writeln!(output)?;
        writeln!(output, "using CE;")?;
        writeln!(output)?;
        writeln!(output, "public static class {DISPATCH_CLASS}")?;
        writeln!(output, "{{")?;
        writeln!(output, "    public static ICELoader CreateLoaderFromHash(uint hash)")?;
        writeln!(output, "    {{")?;
        writeln!(output, "        ICELoader loader = null;")?;
        writeln!(output)?;
        writeln!(output, "        switch (hash)")?;
        writeln!(output, "        {{")?;
        for entry in entries {
            writeln!(output, "            case {}:", entry.hash)?;
            writeln!(output, "                {{")?;
            writeln!(output, "                    loader = new {}();", entry.name)?;
            writeln!(output, "                }}")?;
            writeln!(output, "                break;")?;
        }
        writeln!(output, "        }}")?;
        writeln!(output)?;
        writeln!(output, "        return loader;")?;
        writeln!(output, "    }}")?;
        writeln!(output, "}}")?;
        Ok(output)
    }
}
