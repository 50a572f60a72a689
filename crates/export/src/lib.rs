//! Export helpers for CSV frame recordings and JSON snapshots.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod frames {
    use std::collections::HashMap;
    use std::io::{self, Write};

    use serde::Serialize;
    use tracing::warn;

    use orrery_bodies::BodyId;
    use orrery_scheduler::RenderSink;
    use orrery_session::{BodySnapshot, PositionUpdate};

    /// One CSV row: the position of one body after one tick.
    #[derive(Debug, Clone, Serialize)]
    pub struct FrameRow<'a> {
        pub tick: u64,
        pub body_id: u64,
        pub name: &'a str,
        pub x: f64,
        pub y: f64,
    }

    /// Records every position update as `tick,body_id,name,x,y`.
    ///
    /// Write failures are logged once and stop the recording; the animation itself keeps
    /// running. Call [`CsvFrameSink::finish`] to flush and surface the first error.
    pub struct CsvFrameSink<W: Write> {
        writer: csv::Writer<W>,
        names: HashMap<BodyId, String>,
        tick: u64,
        rows: u64,
        error: Option<csv::Error>,
    }

    impl<W: Write> CsvFrameSink<W> {
        pub fn new(writer: W) -> Self {
            Self {
                writer: csv::Writer::from_writer(writer),
                names: HashMap::new(),
                tick: 1,
                rows: 0,
                error: None,
            }
        }

        /// Rows written so far.
        pub fn rows(&self) -> u64 {
            self.rows
        }

        /// Flush and report the first write error, if any.
        pub fn finish(&mut self) -> Result<u64, csv::Error> {
            if let Some(err) = self.error.take() {
                return Err(err);
            }
            self.writer.flush()?;
            Ok(self.rows)
        }

        /// Flush and hand back the underlying writer.
        pub fn into_inner(mut self) -> Result<W, csv::Error> {
            self.finish()?;
            self.writer
                .into_inner()
                .map_err(|err| csv::Error::from(err.into_error()))
        }

        fn record(&mut self, update: &PositionUpdate) -> Result<(), csv::Error> {
            let name = self.names.get(&update.body).map_or("", String::as_str);
            self.writer.serialize(FrameRow {
                tick: self.tick,
                body_id: update.body.0,
                name,
                x: update.x,
                y: update.y,
            })
        }
    }

    impl<W: Write> RenderSink for CsvFrameSink<W> {
        fn on_position_update(&mut self, update: &PositionUpdate) {
            if self.error.is_some() {
                return;
            }
            match self.record(update) {
                Ok(()) => self.rows += 1,
                Err(err) => {
                    warn!(%err, "frame recording stopped");
                    self.error = Some(err);
                }
            }
        }

        fn on_load(&mut self, bodies: &[BodySnapshot], ticks: u64) {
            self.names = names_by_id(bodies);
            self.tick = ticks + 1;
        }

        fn on_tick_end(&mut self, tick: u64) {
            self.tick = tick + 1;
        }
    }

    fn names_by_id(bodies: &[BodySnapshot]) -> HashMap<BodyId, String> {
        bodies
            .iter()
            .map(|s| (s.id(), s.body.name.clone()))
            .collect()
    }

    /// Prints one human-readable line per update.
    pub struct TextSink<W: Write> {
        out: W,
        names: HashMap<BodyId, String>,
        tick: u64,
    }

    impl<W: Write> TextSink<W> {
        pub fn new(out: W) -> Self {
            Self {
                out,
                names: HashMap::new(),
                tick: 1,
            }
        }

        pub fn into_inner(self) -> W {
            self.out
        }

        fn line(&mut self, update: &PositionUpdate) -> io::Result<()> {
            let name = self.names.get(&update.body).map_or("?", String::as_str);
            writeln!(
                self.out,
                "[{:>6}] {:<12} ({:>9.3}, {:>9.3})",
                self.tick, name, update.x, update.y
            )
        }
    }

    impl<W: Write> RenderSink for TextSink<W> {
        fn on_position_update(&mut self, update: &PositionUpdate) {
            if let Err(err) = self.line(update) {
                warn!(%err, "failed to print frame");
            }
        }

        fn on_load(&mut self, bodies: &[BodySnapshot], ticks: u64) {
            self.names = names_by_id(bodies);
            self.tick = ticks + 1;
        }

        fn on_tick_end(&mut self, tick: u64) {
            self.tick = tick + 1;
            if let Err(err) = self.out.flush() {
                warn!(%err, "failed to flush frames");
            }
        }
    }
}

pub mod snapshots {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use chrono::{SecondsFormat, Utc};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use orrery_core::constants::SUN_RADIUS;
    use orrery_core::vector::Point;
    use orrery_session::{BodySnapshot, SolarSystemSession};

    #[derive(Serialize)]
    struct SnapshotDocument<'a> {
        exported_at: String,
        tick: u64,
        sun: Point,
        sun_radius: f64,
        bodies: &'a [BodySnapshot],
    }

    /// Write every body of the session, with its orbit, as pretty-printed JSON.
    pub fn write_snapshots_json(path: &Path, session: &SolarSystemSession) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(path)?);
        write_snapshots(&mut writer, session)?;
        writer.flush()
    }

    pub fn write_snapshots<W: Write>(writer: W, session: &SolarSystemSession) -> io::Result<()> {
        let bodies = session.snapshots();
        let document = SnapshotDocument {
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            tick: session.ticks(),
            sun: session.sun(),
            sun_radius: SUN_RADIUS,
            bodies: &bodies,
        };
        to_writer_pretty(writer, &document)?;
        Ok(())
    }
}
