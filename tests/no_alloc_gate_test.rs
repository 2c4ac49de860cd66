use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use zen_tetris::core::{MatchConfig, MatchCoordinator, MatchSnapshot};
use zen_tetris::input::InputLatch;
use zen_tetris::term::{FrameBuffer, MatchView, Viewport};
use zen_tetris::types::{MatchMode, PlayerAction, SoftDropStyle};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// One test per binary: the counter is process-wide.
#[test]
fn match_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let config = MatchConfig::new(MatchMode::Dual).with_soft_drop(SoftDropStyle::Sticky);
    let mut game = MatchCoordinator::new(config, 77).unwrap();
    let mut latch = InputLatch::new(MatchMode::Dual);
    let view = MatchView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = MatchSnapshot::default();

    // Warm-up.
    game.snapshot_into(&mut snap);
    view.render_match_into(&snap, false, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        // Soft drops on both boards drive locks, clears, attacks, game over
        // and the sweep within a few hundred ticks.
        for i in 0..2000u32 {
            latch.press(0, PlayerAction::SoftDrop);
            latch.press(1, PlayerAction::SoftDrop);
            if i % 3 == 0 {
                latch.press(0, PlayerAction::Rotate);
                latch.press(1, PlayerAction::MoveLeft);
            }
            let inputs = latch.take();
            let _ = game.tick(0.016, &inputs, &mut ());

            game.snapshot_into(&mut snap);
            view.render_match_into(&snap, false, viewport, &mut fb);
        }
    });

    assert!(allocs == 0);
}
