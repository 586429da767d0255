//! Session command - interactive review shell over an in-memory record store.
//!
//! Files are loaded into the store, listed, inspected and corrected field by
//! field, then exported as one spreadsheet.

use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Args;
use console::style;

use invex_core::models::config::ExportConfig;
use invex_core::{export_as, write_to_path, ExportFormat, Field, InvoicePipeline, OcrBackend, RecordStore, TesseractEngine};

use super::batch::output_path;
use super::config::load_config;
use super::expand_inputs;
use super::process::format_text;

const HELP: &str = "\
Commands:
  load <file or glob>...        extract files and append them
  list                          one line per record
  show <row>                    all fields of a record
  edit <row> <field> <value>    change a field (\\n starts a new line)
  export [name]                 write .xlsx or .csv (default: timestamped .xlsx)
  clear                         drop all records
  fields                        field names usable with edit
  help                          this text
  quit                          leave the session";

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Files or glob patterns to load before the prompt
    inputs: Vec<String>,
}

pub fn run(args: SessionArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pipeline = InvoicePipeline::new(TesseractEngine::new(&config.ocr), &config);
    let mut session = Session::new(pipeline, config.export.clone());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if !args.inputs.is_empty() {
        session.load(&args.inputs, &mut stdout)?;
    }
    writeln!(stdout, "Type 'help' for commands.")?;

    session.repl(stdin.lock(), &mut stdout)
}

enum Flow {
    Continue,
    Quit,
}

/// Shell state: the pipeline and the records loaded so far.
pub struct Session<O> {
    pipeline: InvoicePipeline<O>,
    store: RecordStore,
    export: ExportConfig,
}

impl<O: OcrBackend> Session<O> {
    pub fn new(pipeline: InvoicePipeline<O>, export: ExportConfig) -> Self {
        Self {
            pipeline,
            store: RecordStore::new(),
            export,
        }
    }

    /// Read commands until `quit` or end of input.
    pub fn repl<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        prompt(out)?;
        for line in input.lines() {
            match self.execute(&line?, out) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "{} {}", style("✗").red(), e)?,
            }
            prompt(out)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<Flow> {
        let (command, rest) = split_word(line.trim());

        match command {
            "" => {}
            "load" => {
                let patterns: Vec<String> = rest.split_whitespace().map(String::from).collect();
                if patterns.is_empty() {
                    anyhow::bail!("usage: load <file or glob>...");
                }
                self.load(&patterns, out)?;
            }
            "list" => self.list(out)?,
            "show" => self.show(parse_row(rest)?, out)?,
            "edit" => self.edit(rest, out)?,
            "export" => self.export(rest, out)?,
            "clear" => {
                let count = self.store.len();
                self.store.clear();
                writeln!(out, "Cleared {} records", count)?;
            }
            "fields" => self.fields(out)?,
            "help" | "?" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => anyhow::bail!("unknown command '{}', type 'help'", other),
        }

        Ok(Flow::Continue)
    }

    fn load<W: Write>(&mut self, patterns: &[String], out: &mut W) -> anyhow::Result<()> {
        let files = expand_inputs(patterns)?;
        let report = self.pipeline.process_batch(&files, &mut self.store);

        for warning in &report.warnings {
            writeln!(out, "{} {}", style("⚠").yellow(), warning)?;
        }
        writeln!(
            out,
            "{} Loaded {} files ({} records in session)",
            style("✓").green(),
            report.processed,
            self.store.len()
        )?;
        Ok(())
    }

    fn list<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        if self.store.is_empty() {
            writeln!(out, "No records loaded")?;
            return Ok(());
        }

        writeln!(
            out,
            "{:>4}  {:<24} {:<16} {:<12} {:>12} {:<4}",
            "row", "source file", "invoice number", "date", "total", "cur"
        )?;
        for (row, record) in self.store.iter().enumerate() {
            writeln!(
                out,
                "{:>4}  {:<24} {:<16} {:<12} {:>12} {:<4}",
                row,
                record.source_file(),
                record.invoice_number,
                record.invoice_date,
                record.total_amount,
                record.currency
            )?;
        }
        Ok(())
    }

    fn show<W: Write>(&self, row: usize, out: &mut W) -> anyhow::Result<()> {
        let record = self
            .store
            .get(row)
            .ok_or_else(|| anyhow::anyhow!("no record at row {} ({} loaded)", row, self.store.len()))?;
        write!(out, "{}", format_text(record))?;
        Ok(())
    }

    fn edit<W: Write>(&mut self, args: &str, out: &mut W) -> anyhow::Result<()> {
        let (row, rest) = split_word(args);
        let (field, value) = split_word(rest);
        if row.is_empty() || field.is_empty() {
            anyhow::bail!("usage: edit <row> <field> <value>");
        }

        let row = parse_row(row)?;
        let field: Field = field.parse()?;
        let value = value.replace("\\n", "\n");

        self.store.edit(row, field, value)?;
        writeln!(out, "{} Row {} {} updated", style("✓").green(), row, field)?;
        Ok(())
    }

    fn export<W: Write>(&self, name: &str, out: &mut W) -> anyhow::Result<()> {
        if self.store.is_empty() {
            writeln!(out, "No records to export")?;
            return Ok(());
        }

        let requested = Some(name).filter(|n| !n.is_empty());
        let path = output_path(requested, &self.export);
        let format = ExportFormat::from_filename(&path.to_string_lossy()).unwrap_or(self.export.format);

        let bytes = export_as(self.store.records(), format, &self.export.sheet_name)?;
        write_to_path(&bytes, &path)?;
        writeln!(
            out,
            "{} Exported {} records to {}",
            style("✓").green(),
            self.store.len(),
            path.display()
        )?;
        Ok(())
    }

    fn fields<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        for field in Field::ALL {
            let note = if field.is_editable() { "" } else { " (read-only)" };
            writeln!(out, "  {:<16} {}{}", field.key(), field.label(), note)?;
        }
        Ok(())
    }
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "invex> ")?;
    out.flush()
}

/// First whitespace-separated word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn parse_row(s: &str) -> anyhow::Result<usize> {
    s.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("expected a row number, got '{}'", s.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageFormat, Luma};
    use invex_core::InvexConfig;
    use std::io::Cursor;

    struct StubOcr;

    impl OcrBackend for StubOcr {
        fn recognize(&self, _: &GrayImage) -> invex_core::ocr::Result<String> {
            Ok("Acme Corp.\nInvoice No: A-17\nTotal: $99.00\n".to_string())
        }
    }

    fn png_file(dir: &Path, name: &str) {
        let image = GrayImage::from_fn(8, 8, |x, _| if x < 4 { Luma([0]) } else { Luma([255]) });
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        std::fs::write(dir.join(name), bytes).unwrap();
    }

    fn session() -> Session<StubOcr> {
        let config = InvexConfig::default();
        Session::new(InvoicePipeline::new(StubOcr, &config), config.export)
    }

    fn run_script(session: &mut Session<StubOcr>, script: &str) -> String {
        let mut out = Vec::new();
        session.repl(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_load_edit_export() {
        let dir = tempfile::tempdir().unwrap();
        png_file(dir.path(), "a.png");
        png_file(dir.path(), "b.png");
        let export_path = dir.path().join("review.csv");

        let script = format!(
            "load {}\nedit 1 tax_amount 7.50\nedit 0 Source_File x.png\nexport {}\nquit\n",
            dir.path().join("*.png").display(),
            export_path.display()
        );
        let mut session = session();
        let output = run_script(&mut session, &script);

        assert_eq!(session.store.len(), 2);
        assert_eq!(session.store.get(0).unwrap().invoice_number, "A-17");
        assert_eq!(session.store.get(1).unwrap().tax_amount, "7.50");
        assert_eq!(session.store.get(0).unwrap().source_file(), "a.png");
        assert!(output.contains("read-only"));

        let csv = std::fs::read_to_string(&export_path).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("7.50"));
    }

    #[test]
    fn test_show_and_list() {
        let dir = tempfile::tempdir().unwrap();
        png_file(dir.path(), "scan.png");

        let script = format!("load {}\nlist\nshow 0\nshow 5\n", dir.path().join("scan.png").display());
        let output = run_script(&mut session(), &script);

        assert!(output.contains("A-17"));
        assert!(output.contains("Vendor Name: Acme Corp.\n"));
        assert!(output.contains("no record at row 5"));
    }

    #[test]
    fn test_clear_and_unknown_command() {
        let dir = tempfile::tempdir().unwrap();
        png_file(dir.path(), "scan.png");

        let mut session = session();
        let script = format!(
            "load {}\nclear\nfrobnicate\nexport\n",
            dir.path().join("scan.png").display()
        );
        let output = run_script(&mut session, &script);

        assert!(session.store.is_empty());
        assert!(output.contains("Cleared 1 records"));
        assert!(output.contains("unknown command 'frobnicate'"));
        assert!(output.contains("No records to export"));
    }

    #[test]
    fn test_edit_items_with_newline_escape() {
        let dir = tempfile::tempdir().unwrap();
        png_file(dir.path(), "scan.png");

        let mut session = session();
        let script = format!(
            "load {}\nedit 0 invoice_items Widget 2\\nBolt 5\n",
            dir.path().join("scan.png").display()
        );
        run_script(&mut session, &script);

        assert_eq!(session.store.get(0).unwrap().invoice_items, "Widget 2\nBolt 5");
    }

    #[test]
    fn test_split_word() {
        assert_eq!(split_word("edit 0  vendor_name"), ("edit", "0  vendor_name"));
        assert_eq!(split_word("list"), ("list", ""));
    }
}
