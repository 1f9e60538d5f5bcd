use std::io::{BufRead, Write};

use memfs_store::FileStore;
use tracing::{debug, info};

use crate::command::{parse_line, ShellCommand};
use crate::error::{ParseError, ShellResult};
use crate::render::Renderer;

/// Shell presentation settings.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Printed before every input line.
    pub prompt: String,
    /// Colorize success and error lines.
    pub color: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "memFS> ".into(),
            color: false,
        }
    }
}

/// Counters for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lines that parsed into a command.
    pub commands: usize,
    /// Parse errors plus failed store outcomes.
    pub errors: usize,
    /// Whether the session ended with `exit` rather than end of input.
    pub exited: bool,
}

/// Whether the loop keeps reading after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Read-eval-print loop over an injected store.
pub struct Shell<'a, S: FileStore + ?Sized> {
    store: &'a S,
    config: ShellConfig,
    renderer: Renderer,
}

impl<'a, S: FileStore + ?Sized> Shell<'a, S> {
    pub fn new(store: &'a S, config: ShellConfig) -> Self {
        let renderer = Renderer::new(config.color);
        Self {
            store,
            config,
            renderer,
        }
    }

    /// Run until `exit` or end of input.
    ///
    /// Command results go to `out`, error lines to `err`. Only I/O failures
    /// on the streams themselves end the session early; bytes that are not
    /// UTF-8 are decoded lossily.
    pub fn run<R, W, E>(&self, mut input: R, out: &mut W, err: &mut E) -> ShellResult<SessionStats>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut stats = SessionStats::default();
        self.prompt(out)?;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if self.execute_line(line, out, err, &mut stats)? == Flow::Exit {
                stats.exited = true;
                break;
            }
            self.prompt(out)?;
        }
        info!(
            commands = stats.commands,
            errors = stats.errors,
            "shell session finished"
        );
        Ok(stats)
    }

    /// Parse and run a single line.
    pub fn execute<W: Write, E: Write>(
        &self,
        line: &str,
        out: &mut W,
        err: &mut E,
    ) -> ShellResult<SessionStats> {
        let mut stats = SessionStats::default();
        if self.execute_line(line, out, err, &mut stats)? == Flow::Exit {
            stats.exited = true;
        }
        Ok(stats)
    }

    fn prompt<W: Write>(&self, out: &mut W) -> ShellResult<()> {
        write!(out, "{}", self.config.prompt)?;
        out.flush()?;
        Ok(())
    }

    fn execute_line<W: Write, E: Write>(
        &self,
        line: &str,
        out: &mut W,
        err: &mut E,
        stats: &mut SessionStats,
    ) -> ShellResult<Flow> {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                debug!(line, error = %e, "rejected command line");
                stats.errors += 1;
                writeln!(err, "{}", self.renderer.error(&e.to_string()))?;
                return Ok(Flow::Continue);
            }
        };
        stats.commands += 1;
        let r = &self.renderer;

        match command {
            ShellCommand::Create(names) => {
                for item in self.store.create_files(&names) {
                    match &item.result {
                        Ok(()) => writeln!(out, "{}", r.created(&item.name))?,
                        Err(e) => {
                            stats.errors += 1;
                            writeln!(err, "{}", r.create_failed(e))?;
                        }
                    }
                }
            }
            ShellCommand::Write { requests, missing } => {
                for req in requests {
                    match self.store.write_file(&req.name, req.content.as_bytes()) {
                        Ok(()) => writeln!(out, "{}", r.written(&req.name))?,
                        Err(e) => {
                            stats.errors += 1;
                            writeln!(err, "{}", r.write_failed(&e))?;
                        }
                    }
                }
                for _ in 0..missing {
                    stats.errors += 1;
                    writeln!(err, "{}", r.error(&ParseError::MissingFileName.to_string()))?;
                }
            }
            ShellCommand::Delete(names) => {
                for item in self.store.delete_files(&names) {
                    match &item.result {
                        Ok(()) => writeln!(out, "{}", r.deleted(&item.name))?,
                        Err(e) => {
                            stats.errors += 1;
                            writeln!(err, "{}", r.delete_failed(e))?;
                        }
                    }
                }
            }
            ShellCommand::Read(name) => match self.store.read_file(&name) {
                Ok(content) => writeln!(out, "{}", String::from_utf8_lossy(&content))?,
                Err(e) => {
                    stats.errors += 1;
                    writeln!(err, "{}", r.read_failed(&e))?;
                }
            },
            ShellCommand::List { detailed } => {
                if detailed {
                    writeln!(out, "{}", r.list_header())?;
                }
                for entry in self.store.list_files(detailed) {
                    writeln!(out, "{}", r.list_entry(&entry))?;
                }
            }
            ShellCommand::Exit => {
                writeln!(out, "exiting memFS.")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memfs_store::InMemoryFileStore;
    use std::io::Cursor;

    struct Session {
        out: String,
        err: String,
        stats: SessionStats,
    }

    fn run_script(store: &InMemoryFileStore, script: &str) -> Session {
        let config = ShellConfig {
            prompt: String::new(),
            color: false,
        };
        let shell = Shell::new(store, config);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let stats = shell
            .run(Cursor::new(script.as_bytes()), &mut out, &mut err)
            .unwrap();
        Session {
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
            stats,
        }
    }

    #[test]
    fn create_write_read_delete() {
        let store = InMemoryFileStore::new();
        let s = run_script(
            &store,
            "create a.txt\nwrite a.txt \"hello there\"\nread a.txt\ndelete a.txt\n",
        );
        assert_eq!(
            s.out,
            "file a.txt created successfully.\n\
             successfully written to a.txt.\n\
             hello there\n\
             file a.txt deleted successfully.\n"
        );
        assert_eq!(s.err, "");
        assert_eq!(s.stats.commands, 4);
        assert_eq!(s.stats.errors, 0);
        assert!(!s.stats.exited);
        assert!(store.is_empty());
    }

    #[test]
    fn batch_create_reports_each_name() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "create a\ncreate -n 3 b a c\n");
        assert_eq!(
            s.out,
            "file a created successfully.\n\
             file b created successfully.\n\
             file c created successfully.\n"
        );
        assert_eq!(s.err, "error: another file with a exists.\n");
        assert_eq!(s.stats.errors, 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn batch_delete_reports_each_name() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "create -n 2 a b\ndelete -n 3 a x b\n");
        assert!(s.out.contains("file a deleted successfully."));
        assert!(s.out.contains("file b deleted successfully."));
        assert_eq!(s.err, "error: file x doesn't exist.\n");
        assert!(store.is_empty());
    }

    #[test]
    fn oversize_write_leaves_content() {
        let store = InMemoryFileStore::new();
        let big = "A".repeat(2049);
        let script = format!("create a\nwrite a \"ok\"\nwrite a \"{big}\"\nread a\n");
        let s = run_script(&store, &script);
        assert_eq!(
            s.err,
            "error: Content exceeds the maximum allowed size of 2KB for file a.\n"
        );
        assert!(s.out.ends_with("ok\n"));
    }

    #[test]
    fn multi_write() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "create -n 2 a b\nwrite -n 2 a \"one\" b \"two\"\n");
        assert!(s.out.contains("successfully written to a."));
        assert!(s.out.contains("successfully written to b."));
        assert_eq!(store.read_file("a").unwrap(), b"one");
        assert_eq!(store.read_file("b").unwrap(), b"two");
    }

    #[test]
    fn missing_files_are_reported() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "read ghost\nwrite ghost \"x\"\ndelete ghost\n");
        assert_eq!(
            s.err,
            "error: ghost does not exist.\n\
             error: file ghost does not exist.\n\
             error: file ghost doesn't exist.\n"
        );
        assert_eq!(s.stats.errors, 3);
    }

    #[test]
    fn parse_errors_do_not_end_session() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "bogus\ncreate -n 2 a\n\ncreate\ncreate ok\n");
        assert_eq!(
            s.err,
            "error: invalid command provided.\n\
             error: mismatch in file count.\n\
             error: filename cannot be empty.\n"
        );
        assert_eq!(s.out, "file ok created successfully.\n");
        assert_eq!(s.stats.commands, 1);
        assert_eq!(s.stats.errors, 3);
    }

    #[test]
    fn list_short_and_detailed() {
        let store = InMemoryFileStore::new();
        store.create_files(&["b".to_string(), "a".to_string()]);
        store.write_file("a", b"1234").unwrap();

        let s = run_script(&store, "ls\n");
        let mut names: Vec<&str> = s.out.lines().collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);

        let s = run_script(&store, "ls -l\n");
        let lines: Vec<&str> = s.out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("size"));
        let a_row = lines.iter().find(|l| l.trim_end().ends_with(" a")).unwrap();
        assert!(a_row.starts_with("4 "));
        assert_eq!(a_row.len(), 70);
    }

    #[test]
    fn invalid_utf8_line_does_not_end_session() {
        let store = InMemoryFileStore::new();
        let shell = Shell::new(&store, ShellConfig::default());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let stats = shell
            .run(
                Cursor::new(&b"create a\ncreate \xff\ncreate b\n"[..]),
                &mut out,
                &mut err,
            )
            .unwrap();
        assert_eq!(stats.commands, 3);
        assert_eq!(stats.errors, 0);
        assert_eq!(store.len(), 3);
        assert!(store.read_file("\u{FFFD}").is_ok());
        assert!(store.read_file("b").is_ok());
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "create a\r\nwrite a \"x\"\r\nread a\r\n");
        assert_eq!(s.err, "");
        assert_eq!(store.read_file("a").unwrap(), b"x");
    }

    #[test]
    fn last_line_without_newline_runs() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "create a\ncreate b");
        assert_eq!(s.stats.commands, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn short_counted_write_applies_present_pairs() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "create a\nwrite -n 3 a \"kept\"\n");
        assert!(s.out.contains("successfully written to a."));
        assert_eq!(
            s.err,
            "error: filename cannot be empty.\n\
             error: filename cannot be empty.\n"
        );
        assert_eq!(s.stats.errors, 2);
        assert_eq!(store.read_file("a").unwrap(), b"kept");
    }

    #[test]
    fn unquoted_write_clears_content() {
        let store = InMemoryFileStore::new();
        store.create_file("a").unwrap();
        store.write_file("a", b"old").unwrap();
        let s = run_script(&store, "write a hello\n");
        assert_eq!(s.out, "successfully written to a.\n");
        assert!(store.read_file("a").unwrap().is_empty());
    }

    #[test]
    fn exit_stops_reading() {
        let store = InMemoryFileStore::new();
        let s = run_script(&store, "create a\nexit\ncreate b\n");
        assert_eq!(s.out, "file a created successfully.\nexiting memFS.\n");
        assert!(s.stats.exited);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn prompt_is_printed_per_line() {
        let store = InMemoryFileStore::new();
        let shell = Shell::new(&store, ShellConfig::default());
        let mut out = Vec::new();
        let mut err = Vec::new();
        shell
            .run(Cursor::new("ls\nls\n"), &mut out, &mut err)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("memFS> ").count(), 3);
    }

    #[test]
    fn execute_single_line() {
        let store = InMemoryFileStore::new();
        let shell = Shell::new(&store, ShellConfig::default());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let stats = shell.execute("create solo", &mut out, &mut err).unwrap();
        assert_eq!(stats.commands, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "file solo created successfully.\n");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn works_with_trait_objects() {
        let store: Box<dyn FileStore> = Box::new(InMemoryFileStore::new());
        let shell = Shell::new(store.as_ref(), ShellConfig::default());
        let mut out = Vec::new();
        let mut err = Vec::new();
        shell.execute("create dyn", &mut out, &mut err).unwrap();
        assert!(store.read_file("dyn").unwrap().is_empty());
    }
}
