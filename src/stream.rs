//! # Sentence Stream
//!
//! Runs the decoder over a source of lines, typically a serial port or a log
//! file, and reports one [`Event`] per line. Lines that fail to decode are
//! reported as [`Diagnostic`]s and the stream moves on; only a failing source
//! ends it.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use nmea0183_decoder::stream::{Event, ReaderSource, SentenceStreamBuilder};
//!
//! let log = "$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\nnoise\r\n";
//! let stream = SentenceStreamBuilder::new(ReaderSource::new(Cursor::new(log))).build();
//!
//! let events: Vec<_> = stream.collect::<Result<_, _>>().unwrap();
//! assert!(matches!(events[0], Event::Sentence(_)));
//! assert!(matches!(events[1], Event::Diagnostic(_)));
//! ```

use std::{
    io::{self, BufRead},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, SyncSender},
    },
    thread,
    time::Duration,
};

use log::{debug, error, info, trace, warn};

use crate::{DecodeError, DecodedSentence, Decoder, StreamError};

/// Result of one bounded read from a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line, terminator included or not
    Line(String),
    /// Nothing arrived within the timeout
    TimedOut,
    /// The source is exhausted
    Closed,
}

/// A source of text lines with a bounded wait.
pub trait LineSource {
    /// Reads the next line, waiting at most `timeout` if the source supports it.
    ///
    /// Sources that cannot time out on their own may ignore `timeout`.
    fn read_line(&mut self, timeout: Duration) -> io::Result<ReadOutcome>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn read_line(&mut self, timeout: Duration) -> io::Result<ReadOutcome> {
        (**self).read_line(timeout)
    }
}

/// Adapts any [`BufRead`] as a [`LineSource`].
///
/// The read timeout of the underlying device (a serial port, say) is
/// configured on the device. `TimedOut` and `WouldBlock` errors are reported
/// as [`ReadOutcome::TimedOut`]. Invalid UTF-8 is replaced rather than
/// rejected, so the framer can report the line as non-ASCII.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            buf: Vec::with_capacity(128),
        }
    }

    /// Consumes the source, returning the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, _timeout: Duration) -> io::Result<ReadOutcome> {
        match self.reader.read_until(b'\n', &mut self.buf) {
            // A partial line stays buffered until the rest of it arrives.
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Ok(ReadOutcome::TimedOut)
            }
            Err(e) => Err(e),
            Ok(0) if self.buf.is_empty() => Ok(ReadOutcome::Closed),
            Ok(_) => {
                let line = String::from_utf8_lossy(&self.buf).into_owned();
                self.buf.clear();
                Ok(ReadOutcome::Line(line))
            }
        }
    }
}

/// Moves a blocking source onto its own thread.
///
/// The thread reads ahead up to `capacity` lines and then blocks until the
/// consumer catches up. The returned [`QueuedSource`] honours the read
/// timeout regardless of the wrapped source.
///
/// The thread ends when the source closes or fails, or once the
/// `QueuedSource` is dropped and the next line has been read.
pub fn spawn_reader<S>(mut source: S, capacity: usize) -> io::Result<QueuedSource>
where
    S: LineSource + Send + 'static,
{
    let (tx, rx): (SyncSender<io::Result<String>>, _) = mpsc::sync_channel(capacity);

    thread::Builder::new()
        .name("nmea-reader".to_owned())
        .spawn(move || {
            loop {
                let line = match source.read_line(Duration::MAX) {
                    Ok(ReadOutcome::Line(line)) => Ok(line),
                    Ok(ReadOutcome::TimedOut) => continue,
                    Ok(ReadOutcome::Closed) => break,
                    Err(e) => Err(e),
                };
                let failed = line.is_err();

                if tx.send(line).is_err() || failed {
                    break;
                }
            }
            debug!("reader thread: exiting");
        })?;

    Ok(QueuedSource { rx })
}

/// The consuming end of [`spawn_reader`].
#[derive(Debug)]
pub struct QueuedSource {
    rx: Receiver<io::Result<String>>,
}

impl LineSource for QueuedSource {
    fn read_line(&mut self, timeout: Duration) -> io::Result<ReadOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(line) => line.map(ReadOutcome::Line),
            Err(RecvTimeoutError::Timeout) => Ok(ReadOutcome::TimedOut),
            Err(RecvTimeoutError::Disconnected) => Ok(ReadOutcome::Closed),
        }
    }
}

/// One line's worth of stream output.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A decoded sentence, possibly [`DecodedSentence::Unknown`]
    Sentence(DecodedSentence),
    /// A line that did not decode
    Diagnostic(Diagnostic),
}

impl Event {
    /// The decoded sentence, if this event carries one.
    pub fn sentence(&self) -> Option<&DecodedSentence> {
        match self {
            Event::Sentence(sentence) => Some(sentence),
            Event::Diagnostic(_) => None,
        }
    }
}

/// A line that did not decode, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The line as read, without its terminator
    pub line: String,
    /// Why the line was rejected
    pub error: DecodeError,
}

/// Builds a [`SentenceStream`].
///
/// # Examples
///
/// ```rust
/// use std::{
///     io::Cursor,
///     sync::{Arc, atomic::AtomicBool},
///     time::Duration,
/// };
///
/// use nmea0183_decoder::{
///     Decoder,
///     stream::{ReaderSource, SentenceStreamBuilder},
/// };
///
/// let shutdown = Arc::new(AtomicBool::new(false));
/// let stream = SentenceStreamBuilder::new(ReaderSource::new(Cursor::new("")))
///     .decoder(Decoder::default())
///     .read_timeout(Duration::from_millis(250))
///     .shutdown(shutdown.clone())
///     .build();
///
/// assert_eq!(stream.count(), 0);
/// ```
#[must_use]
pub struct SentenceStreamBuilder<S> {
    source: S,
    decoder: Decoder,
    read_timeout: Duration,
    shutdown: Arc<AtomicBool>,
}

impl<S: LineSource> SentenceStreamBuilder<S> {
    /// New stream over `source`, with a UTC decoder and a one second read
    /// timeout.
    pub fn new(source: S) -> Self {
        SentenceStreamBuilder {
            source,
            decoder: Decoder::default(),
            read_timeout: Duration::from_secs(1),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Decodes with `decoder`, for a local offset other than UTC.
    pub fn decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Longest wait for a line before the shutdown flag is checked again.
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Ends the stream once `shutdown` is set.
    pub fn shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Builds the stream.
    pub fn build(self) -> SentenceStream<S> {
        SentenceStream {
            source: self.source,
            decoder: self.decoder,
            read_timeout: self.read_timeout,
            shutdown: self.shutdown,
            finished: false,
        }
    }
}

/// Iterator of decoded lines.
///
/// Yields one `Ok(Event)` per line read. Ends when the source closes or the
/// shutdown flag is set. A source error is yielded once, as
/// [`StreamError::Source`], and ends the stream.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct SentenceStream<S> {
    source: S,
    decoder: Decoder,
    read_timeout: Duration,
    shutdown: Arc<AtomicBool>,
    finished: bool,
}

impl<S: LineSource> SentenceStream<S> {
    /// A handle to the shutdown flag, for use from another thread.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    fn process(&self, line: String) -> Event {
        let line = line.trim_end_matches(['\r', '\n']).to_owned();

        match self.decoder.decode(&line) {
            Ok(sentence) => {
                if let DecodedSentence::Unknown(unknown) = &sentence {
                    info!("unknown sentence type {:?}: {}", unknown.code, line);
                }
                Event::Sentence(sentence)
            }
            Err(error) => {
                match &error {
                    DecodeError::Frame(reason) => debug!("skipping line ({}): {:?}", reason, line),
                    _ => warn!("{}: {}", error, line),
                }
                Event::Diagnostic(Diagnostic { line, error })
            }
        }
    }
}

impl<S: LineSource> Iterator for SentenceStream<S> {
    type Item = Result<Event, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if self.shutdown.load(Ordering::Relaxed) {
                info!("sentence stream: shutdown requested");
                self.finished = true;
                break;
            }

            match self.source.read_line(self.read_timeout) {
                Ok(ReadOutcome::Line(line)) => return Some(Ok(self.process(line))),
                Ok(ReadOutcome::TimedOut) => trace!("sentence stream: read timed out"),
                Ok(ReadOutcome::Closed) => {
                    debug!("sentence stream: source closed");
                    self.finished = true;
                }
                Err(e) => {
                    error!("sentence stream: source failed: {}", e);
                    self.finished = true;
                    return Some(Err(StreamError::Source(e)));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io::Cursor};

    use super::*;
    use crate::{FrameError, SentenceType};

    /// Replays scripted read outcomes, then closes.
    struct Scripted(VecDeque<io::Result<ReadOutcome>>);

    impl Scripted {
        fn new(outcomes: impl IntoIterator<Item = io::Result<ReadOutcome>>) -> Self {
            Scripted(outcomes.into_iter().collect())
        }
    }

    impl LineSource for Scripted {
        fn read_line(&mut self, _timeout: Duration) -> io::Result<ReadOutcome> {
            self.0.pop_front().unwrap_or(Ok(ReadOutcome::Closed))
        }
    }

    fn line(line: &str) -> io::Result<ReadOutcome> {
        Ok(ReadOutcome::Line(line.to_owned()))
    }

    #[test]
    fn test_reader_source() {
        let input = b"$GPTXT,hi*62\r\n\xffbad\r\nlast".to_vec();
        let mut source = ReaderSource::new(Cursor::new(input));
        let timeout = Duration::from_secs(1);

        let expected = [
            ReadOutcome::Line("$GPTXT,hi*62\r\n".to_owned()),
            ReadOutcome::Line("\u{fffd}bad\r\n".to_owned()),
            ReadOutcome::Line("last".to_owned()),
            ReadOutcome::Closed,
        ];

        for outcome in expected {
            assert_eq!(source.read_line(timeout).unwrap(), outcome);
        }
    }

    #[test]
    fn test_stream_events() {
        let source = Scripted::new([
            line("$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n"),
            Ok(ReadOutcome::TimedOut),
            line("garbage\r\n"),
            line("$GPGLL,4916.45,N,12311.12,W,225444,A*32\r\n"),
            line("$GPXTE,A,A,0.67,L,N*6F\r\n"),
        ]);
        let events: Vec<_> = SentenceStreamBuilder::new(source)
            .build()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(events[0].sentence().map(|s| s.sentence_type()), Some(SentenceType::GLL));
        assert_eq!(
            events[1],
            Event::Diagnostic(Diagnostic {
                line: "garbage".to_owned(),
                error: DecodeError::Frame(FrameError::MissingStartMarker),
            })
        );
        assert_eq!(
            events[2],
            Event::Diagnostic(Diagnostic {
                line: "$GPGLL,4916.45,N,12311.12,W,225444,A*32".to_owned(),
                error: DecodeError::ChecksumMismatch {
                    computed: 0x31,
                    transmitted: 0x32,
                },
            })
        );
        assert_eq!(
            events[3].sentence().map(|s| s.sentence_type()),
            Some(SentenceType::Unknown("XTE".to_owned()))
        );
    }

    #[test]
    fn test_stream_source_failure() {
        let source = Scripted::new([
            line("$GPTXT,hi*62"),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged")),
            line("$GPGLL,4916.45,N,12311.12,W,225444,A*31"),
        ]);
        let mut stream = SentenceStreamBuilder::new(source).build();

        assert!(matches!(stream.next(), Some(Ok(_))));
        assert!(matches!(stream.next(), Some(Err(StreamError::Source(_)))));
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_stream_shutdown() {
        let source = Scripted::new((0..10).map(|_| Ok(ReadOutcome::TimedOut)).chain([line(
            "$GPGLL,4916.45,N,12311.12,W,225444,A*31",
        )]));
        let mut stream = SentenceStreamBuilder::new(source).build();
        let shutdown = stream.shutdown_handle();

        shutdown.store(true, Ordering::Relaxed);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_queued_source() {
        let log = "$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n$GPXTE,A,A,0.67,L,N*6F\r\n";
        let queued = spawn_reader(ReaderSource::new(Cursor::new(log)), 1).unwrap();

        let events: Vec<_> = SentenceStreamBuilder::new(queued)
            .read_timeout(Duration::from_millis(50))
            .build()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| event.sentence().is_some()));
    }

    #[test]
    fn test_queued_source_failure() {
        let source = Scripted::new([Err(io::Error::other("gone"))]);
        let mut queued = spawn_reader(source, 4).unwrap();

        let outcome = queued.read_line(Duration::from_secs(5));
        assert_eq!(outcome.unwrap_err().kind(), io::ErrorKind::Other);
        assert_eq!(queued.read_line(Duration::from_secs(5)).unwrap(), ReadOutcome::Closed);
    }
}
