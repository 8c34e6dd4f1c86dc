//! End-to-end behavior of the mounted site

use proptest::prelude::*;

use reveal_app::sections::Section;
use reveal_app::{MotionOverride, RevealConfig, SiteContent, SitePage};
use reveal_core::{MotionPreference, RegionId, VisualState};
use reveal_layout::{EntryPhase, FireDirection, LightboxEvent, LightboxState, TriggerHandle, Viewport};

// Section tops for a 1280x800 viewport with the bundled content:
// hero 0, book 800, brands 1700, gallery 2100 (grid 2340),
// timeline 3108, contact 4428, page height 5228.

fn viewport() -> Viewport {
    Viewport::new(0.0, 1280.0, 800.0)
}

fn mount(config: &RevealConfig, motion: MotionPreference) -> SitePage {
    let content = SiteContent::bundled().unwrap();
    SitePage::mount(config, &content, viewport(), &motion).unwrap()
}

fn mount_default() -> SitePage {
    mount(&RevealConfig::default(), MotionPreference::NoPreference)
}

fn settled(page: &SitePage, region: RegionId) -> bool {
    page.regions()
        .visual(region)
        .is_some_and(|v| !v.differs_from(&VisualState::VISIBLE))
}

fn fire_count(page: &SitePage, handle: TriggerHandle) -> Option<u32> {
    page.registry().lock().unwrap().fire_count(handle)
}

#[test]
fn test_layout() {
    let page = mount_default();
    assert_eq!(page.height(), 5228.0);
    assert_eq!(page.gallery().tiles().len(), 6);
    assert_eq!(page.timeline().items().len(), 5);
    assert_eq!(page.hero().words().len(), 2);
}

#[test]
fn test_mount_reveals_hero() {
    let mut page = mount_default();

    for handle in page.hero().handles() {
        assert_eq!(fire_count(&page, *handle), Some(1));
    }
    // 16 bindings, the four hero ones fired at mount
    assert_eq!(page.live_observations(), 12);
    assert_eq!(page.regions().visual(page.book().cover()).map(|v| v.opacity), Some(0.0));

    for _ in 0..150 {
        page.tick(16.0);
    }
    assert!(page.hero().words().iter().all(|w| settled(&page, *w)));
    assert!(settled(&page, page.hero().subtitle()));
    assert!(settled(&page, page.hero().cta()));
}

#[test]
fn test_hero_entrance_is_sequenced() {
    let mut page = mount_default();
    let opacity = |page: &SitePage, r: RegionId| page.regions().visual(r).unwrap().opacity;
    let hero = page.hero();
    let (root, word, subtitle, cta) = (hero.root(), hero.words()[0], hero.subtitle(), hero.cta());

    // Root fades first; everything else waits for it
    page.tick(400.0);
    assert!(opacity(&page, root) > 0.0);
    assert_eq!(opacity(&page, word), 0.0);
    assert_eq!(opacity(&page, subtitle), 0.0);

    // Subtitle overlaps the words, the call to action has not begun
    page.tick(1000.0);
    assert!(opacity(&page, word) > 0.0);
    assert!(opacity(&page, subtitle) > 0.0);
    assert_eq!(opacity(&page, cta), 0.0);

    page.tick(1000.0);
    assert!(settled(&page, cta));
    assert!(settled(&page, subtitle));
}

#[test]
fn test_book_copy_follows_cover() {
    let mut page = mount_default();
    page.scroll_to(300.0);
    let lines = page.regions().children(page.book().copy()).to_vec();
    assert!(!lines.is_empty());

    page.tick(400.0);
    assert!(page.regions().visual(page.book().cover()).unwrap().opacity > 0.0);
    assert!(lines
        .iter()
        .all(|l| page.regions().visual(*l).unwrap().opacity == 0.0));

    page.tick(3000.0);
    assert!(lines.iter().all(|l| settled(&page, *l)));
}

#[test]
fn test_ambient_motion_loops() {
    let mut page = mount_default();
    let art = page.book().cover_art();
    assert!(page.book().is_floating());
    assert!(page.hero().is_drifting());
    let rest: Vec<_> = page
        .hero()
        .particles()
        .iter()
        .map(|p| page.regions().visual(*p).unwrap())
        .collect();

    page.tick(1500.0);
    page.tick(1500.0);
    let top = page.regions().visual(art).unwrap();
    assert!((top.translate_y + 15.0).abs() < 1e-3);

    page.tick(3000.0);
    assert!(page.regions().visual(art).unwrap().translate_y.abs() < 1e-3);
    assert!(page.tick(16.0));

    let moved = page
        .hero()
        .particles()
        .iter()
        .zip(&rest)
        .any(|(p, r)| page.regions().visual(*p).unwrap().differs_from(r));
    assert!(moved);
}

#[test]
fn test_book_toggles_forward_reverse_forward() {
    let mut page = mount_default();
    let cover = page.book().cover_handle();

    let down = page.scroll_to(300.0);
    assert!(down
        .fired
        .iter()
        .any(|f| f.handle == cover && f.direction == FireDirection::Forward));

    let up = page.scroll_to(100.0);
    assert!(up
        .fired
        .iter()
        .any(|f| f.handle == cover && f.direction == FireDirection::Reverse));

    let again = page.scroll_to(300.0);
    assert!(again
        .fired
        .iter()
        .any(|f| f.handle == cover && f.direction == FireDirection::Forward));

    assert_eq!(fire_count(&page, cover), Some(3));
    assert_eq!(
        page.registry().lock().unwrap().phase(cover),
        Some(EntryPhase::Entered)
    );
}

#[test]
fn test_stats_count_up_once() {
    let mut page = mount_default();
    assert_eq!(page.book().stat_labels(), vec!["0K+", "0.0", "0+"]);

    page.scroll_to(800.0);
    page.tick(1000.0);
    assert!(page.book().is_counting());
    page.tick(1000.0);
    assert_eq!(page.book().stat_labels(), vec!["10K+", "4.9", "50+"]);

    page.scroll_to(0.0);
    page.scroll_to(800.0);
    page.tick(500.0);
    assert!(!page.book().is_counting());
    assert_eq!(page.book().stat_labels(), vec!["10K+", "4.9", "50+"]);
}

#[test]
fn test_gallery_staggers_on_entry() {
    let mut page = mount_default();
    let grid = page.gallery().grid_handle();

    page.scroll_to(1699.0);
    assert_eq!(fire_count(&page, grid), Some(0));
    page.scroll_to(1700.0);
    assert_eq!(fire_count(&page, grid), Some(1));

    // First tile is ahead of the last by the stagger delay
    page.tick(400.0);
    let tiles = page.gallery().tiles().to_vec();
    let first = page.regions().visual(tiles[0]).unwrap().opacity;
    let last = page.regions().visual(tiles[5]).unwrap().opacity;
    assert!(first > last);

    page.tick(2000.0);
    assert!(tiles.iter().all(|t| settled(&page, *t)));
}

#[test]
fn test_timeline_entries_fire_individually() {
    let mut page = mount_default();
    let items = page.timeline().item_handles().to_vec();

    page.scroll_to(2700.0);
    assert_eq!(fire_count(&page, items[0]), Some(1));
    assert_eq!(fire_count(&page, items[1]), Some(0));

    page.scroll_to(5000.0);
    assert!(items.iter().all(|h| fire_count(&page, *h) == Some(1)));
    assert_eq!(fire_count(&page, page.contact().form_handle()), Some(1));
}

#[test]
fn test_lightbox_walkthrough() {
    let mut page = mount_default();

    assert!(page.click_gallery_item(1));
    assert!(page.is_scroll_locked());
    assert_eq!(page.gallery().current_item().map(|i| i.id), Some(2));

    page.lightbox_event(LightboxEvent::Next);
    page.lightbox_event(LightboxEvent::Jump(5));
    page.lightbox_event(LightboxEvent::Next);
    assert_eq!(page.gallery().lightbox().state(), LightboxState::Open(0));
    page.lightbox_event(LightboxEvent::Previous);
    assert_eq!(page.gallery().lightbox().current_index(), Some(5));

    assert!(page.lightbox_event(LightboxEvent::BackdropClick));
    assert!(!page.is_scroll_locked());
    assert!(!page.lightbox_event(LightboxEvent::Next));
    assert!(!page.click_gallery_item(6));
    assert!(!page.is_scroll_locked());
}

#[test]
fn test_escape_respects_config() {
    let mut config = RevealConfig::default();
    config.lightbox.close_on_escape = false;
    let mut page = mount(&config, MotionPreference::NoPreference);

    page.click_gallery_item(0);
    assert!(!page.press_escape());
    assert!(page.is_scroll_locked());
    assert!(page.lightbox_event(LightboxEvent::Close));
    assert!(!page.is_scroll_locked());
}

#[test]
fn test_unmount_releases_everything() {
    let mut page = mount_default();
    page.scroll_to(1000.0);
    page.click_gallery_item(3);
    assert!(page.is_scroll_locked());

    page.unmount();
    assert!(!page.is_scroll_locked());
    assert!(!page.hero().is_drifting());
    assert!(!page.book().is_floating());
    assert_eq!(page.live_observations(), 0);
    assert!(page.registry().lock().unwrap().is_empty());
    assert!(page.regions().is_empty());

    for y in [0.0, 5000.0, 0.0, 5000.0] {
        assert!(page.scroll_to(y).fired.is_empty());
    }
    assert!(!page.click_gallery_item(0));
    assert!(!page.is_scroll_locked());

    page.unmount();
}

#[test]
fn test_drop_unlocks_scroll() {
    let mut page = mount_default();
    let lock = page.scroll_lock().clone();
    page.click_gallery_item(0);
    assert!(lock.is_locked());
    drop(page);
    assert!(!lock.is_locked());
}

#[test]
fn test_reduced_motion_renders_final_state() {
    let mut page = mount(&RevealConfig::default(), MotionPreference::Reduce);

    assert_eq!(page.live_observations(), 0);
    assert!(page.registry().lock().unwrap().is_empty());
    assert!(page.hero().words().iter().all(|w| settled(&page, *w)));
    assert!(page.gallery().tiles().iter().all(|t| settled(&page, *t)));
    assert!(page.timeline().items().iter().all(|t| settled(&page, *t)));
    assert!(settled(&page, page.timeline().line()));
    assert!(settled(&page, page.contact().form()));
    assert_eq!(page.book().stat_labels(), vec!["10K+", "4.9", "50+"]);
    assert!(!page.brands().is_running());
    assert!(!page.book().is_floating());
    assert!(!page.hero().is_drifting());
    assert_eq!(
        page.regions().visual(page.book().cover_art()),
        Some(VisualState::VISIBLE)
    );

    assert!(page.scroll_to(3000.0).fired.is_empty());
    assert!(!page.tick(16.0));
}

#[test]
fn test_config_forces_motion_preference() {
    let mut config = RevealConfig::default();
    config.motion.force = MotionOverride::Reduce;
    let page = mount(&config, MotionPreference::NoPreference);
    assert_eq!(page.live_observations(), 0);

    config.motion.force = MotionOverride::NoPreference;
    let page = mount(&config, MotionPreference::Reduce);
    assert_eq!(page.live_observations(), 12);
}

#[test]
fn test_navbar_flag() {
    let mut page = mount_default();
    assert_eq!(page.scroll_to(30.0).navbar_scrolled, None);
    assert_eq!(page.scroll_to(60.0).navbar_scrolled, Some(true));
    assert!(page.navbar_scrolled());
    assert_eq!(page.scroll_to(400.0).navbar_scrolled, None);
    assert_eq!(page.scroll_to(10.0).navbar_scrolled, Some(false));
}

#[test]
fn test_brand_marquee_advances() {
    let mut page = mount_default();
    assert!(page.brands().is_running());

    page.tick(1000.0);
    assert!((page.brands().carousel().offset() - 64.0).abs() < 1e-3);
    let track = page.regions().visual(page.brands().track()).unwrap();
    assert!((track.translate_x + 64.0).abs() < 1e-3);

    page.brands_mut().set_hovered(true);
    page.tick(1000.0);
    assert!((page.brands().carousel().offset() - 128.0).abs() < 1e-3);

    let visible = page.brands().visible_brands();
    assert!(!visible.is_empty());
    assert!(visible.windows(2).all(|w| w[0].1.x <= w[1].1.x));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn once_bindings_fire_at_most_once(scrolls in proptest::collection::vec(0.0f32..5300.0, 1..40)) {
        let mut page = mount_default();
        let mut handles = page.timeline().item_handles().to_vec();
        handles.push(page.gallery().grid_handle());
        handles.push(page.contact().form_handle());

        for y in scrolls {
            page.scroll_to(y);
            page.tick(16.0);
            for h in &handles {
                prop_assert!(fire_count(&page, *h).unwrap_or(0) <= 1);
            }
        }

        page.scroll_to(5300.0);
        for h in &handles {
            prop_assert_eq!(fire_count(&page, *h), Some(1));
        }
    }

    #[test]
    fn scroll_lock_tracks_lightbox(events in proptest::collection::vec(0u8..7, 0..50)) {
        let mut page = mount_default();
        for (i, e) in events.into_iter().enumerate() {
            let event = match e {
                0 => LightboxEvent::Activate(i % 8),
                1 => LightboxEvent::Close,
                2 => LightboxEvent::Next,
                3 => LightboxEvent::Previous,
                4 => LightboxEvent::Jump(i % 8),
                5 => LightboxEvent::BackdropClick,
                _ => LightboxEvent::Escape,
            };
            page.lightbox_event(event);
            prop_assert_eq!(page.is_scroll_locked(), page.gallery().lightbox().is_open());
        }
        page.unmount();
        prop_assert!(!page.is_scroll_locked());
    }
}
