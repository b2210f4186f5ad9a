//! End-to-end: widgets laid out by a grid, rendered through each screen
//! source, and event polls cancelled under load.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use gtui_backend::{Backend, Config, Recv, capture};
use gtui_core::event::Event;
use gtui_layout::{Grid, GridItem};
use gtui_render::{Drawable, SharedDrawable, drawable};
use gtui_widgets::{Block, Paragraph};

fn dashboard(width: u16, height: u16) -> Arc<Mutex<Grid>> {
    let left = drawable::shared(Block::default().title("left"));
    let right = drawable::shared(Paragraph::default().text("[ok](fg:green)"));
    let mut grid = Grid::new();
    grid.set(vec![
        GridItem::col_leaf(0.5, left),
        GridItem::col_leaf(0.5, right),
    ]);
    grid.set_rect(0, 0, width, height);
    drawable::shared(grid)
}

#[test]
fn grid_renders_into_a_simulated_screen() {
    let mut backend = Backend::with_config(Config::simulated(20, 4)).unwrap();
    let root: SharedDrawable = dashboard(20, 4);
    backend.render(&[root]).unwrap();
    let snap = backend.snapshot().unwrap();
    assert_eq!(snap.row_text(0), "┌─left───┐┌────────┐");
    assert_eq!(snap.row_text(1), "│        ││ok      │");
    assert_eq!(snap.row_text(3), "└────────┘└────────┘");
}

#[test]
fn cancel_under_a_flood_of_events() {
    let backend = Backend::with_config(
        Config::simulated(4, 1).with_read_cycle(Duration::from_millis(10)),
    )
    .unwrap();
    let input = backend.simulated_input().unwrap();
    let mut stream = backend.poll_events().unwrap();
    let signal = stream.cancel_signal();

    let producer = {
        let input = input.clone();
        thread::spawn(move || {
            for i in 0..500 {
                input.push(Event::key(i.to_string()));
            }
        })
    };

    let mut seen = 0;
    while let Some(_event) = stream.recv() {
        seen += 1;
        if seen == 5 {
            signal.cancel();
        }
    }
    producer.join().unwrap();
    assert_eq!(seen, 5);
    assert!(stream.is_finished());

    // The source went back to the backend, so a new poll resumes the queue.
    let mut again = backend.poll_events().unwrap();
    match again.recv_timeout(Duration::from_secs(2)) {
        Recv::Event(event) => assert!(event.id().parse::<u32>().unwrap() >= 5),
        other => panic!("expected an event, got {other:?}"),
    }
    again.cancel();
}

#[test]
fn dropping_an_idle_stream_joins_promptly() {
    let backend = Backend::with_config(Config::simulated(4, 1)).unwrap();
    let stream = backend.poll_events().unwrap();
    let start = Instant::now();
    drop(stream);
    assert!(start.elapsed() < Duration::from_secs(1));
    assert!(backend.poll_events().is_ok());
}

#[test]
fn capture_helpers_do_not_exit() {
    let root: SharedDrawable = dashboard(20, 4);
    let image = capture(20, 4, &[root.clone()]);
    assert_eq!(image.dimensions(), (20 * 7, 4 * 13));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dash.png");
    gtui_backend::save_image(&path, 20, 4, &[root]).unwrap();
    assert!(path.exists());
}

#[cfg(unix)]
#[test]
fn remote_sessions_are_independent() {
    use std::io::Read;
    use std::os::unix::net::UnixStream;

    let (a_local, mut a_remote) = UnixStream::pair().unwrap();
    let (b_local, mut b_remote) = UnixStream::pair().unwrap();
    let mut a = Backend::with_config(Config::remote(a_local).with_size(20, 4)).unwrap();
    let mut b = Backend::with_config(Config::remote(b_local).with_size(10, 2)).unwrap();
    assert_eq!(a.dimensions(), (20, 4));
    assert_eq!(b.dimensions(), (10, 2));

    let root: SharedDrawable = dashboard(20, 4);
    a.render(&[root]).unwrap();
    b.render(&[]).unwrap();

    let drain = |s: &mut UnixStream| {
        s.set_read_timeout(Some(Duration::from_millis(50))).unwrap();
        let mut out = Vec::new();
        let mut chunk = [0u8; 4096];
        while let Ok(n) = s.read(&mut chunk) {
            if n == 0 {
                break;
            }
            out.extend_from_slice(&chunk[..n]);
        }
        String::from_utf8_lossy(&out).into_owned()
    };
    assert!(drain(&mut a_remote).contains("left"));
    assert!(!drain(&mut b_remote).contains("left"));

    let mut events = a.poll_events().unwrap();
    use std::io::Write;
    a_remote.write_all(b"q").unwrap();
    assert!(events.recv().unwrap().is("q"));
    events.cancel();
}
