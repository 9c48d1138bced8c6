use proptest::prelude::*;
use tint_runtime::{
    BrandingPolicy, MemoryStore, PreferenceStore, StyleSurface, THEME_KEY, ThemeContext, shade_key,
};
use tint_style::{Color, Role, Shade, ThemeMode, validate};

fn hex_color() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
}

fn mode() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![Just(ThemeMode::Dark), Just(ThemeMode::Light)]
}

proptest! {
    #[test]
    fn written_background_always_suits_its_mode(hex in hex_color(), mode in mode()) {
        let mut ctx = ThemeContext::in_memory();
        let applied = ctx.apply_background(Some(&hex), mode);
        prop_assert!(validate::is_suitable(Role::Background, applied.color, mode));
        let written = ctx
            .surface()
            .property(&shade_key(mode, Role::Background, Shade::S500))
            .map(str::to_owned);
        prop_assert_eq!(written, Some(applied.color.to_hex()));
    }

    #[test]
    fn written_text_always_suits_its_mode(hex in hex_color(), mode in mode()) {
        let mut ctx = ThemeContext::in_memory();
        let applied = ctx.apply_text(Some(&hex), mode);
        prop_assert!(validate::is_suitable(Role::Text, applied.color, mode));
        prop_assert_eq!(applied.used_fallback(), !validate::is_suitable(
            Role::Text,
            Color::parse(&hex).unwrap(),
            mode,
        ));
    }

    #[test]
    fn apply_is_idempotent(hex in hex_color(), mode in mode()) {
        let mut ctx = ThemeContext::in_memory();
        ctx.apply_primary(&hex, mode).unwrap();
        let once = ctx.surface().clone();
        ctx.apply_primary(&hex, mode).unwrap();
        prop_assert_eq!(ctx.surface(), &once);
    }

    #[test]
    fn last_set_mode_is_persisted(modes in prop::collection::vec(mode(), 1..12)) {
        let mut ctx = ThemeContext::in_memory();
        for mode in &modes {
            ctx.set_mode(*mode);
        }
        let last = *modes.last().unwrap();
        prop_assert_eq!(ctx.mode(), last);
        prop_assert_eq!(ctx.mode_version(), modes.len() as u64);

        let stored = ctx.store().get_item(THEME_KEY).unwrap();
        let fresh_store = MemoryStore::new().with_item(THEME_KEY, stored.as_deref().unwrap());
        let mut fresh = ThemeContext::new(tint_runtime::InMemoryStyleSurface::new(), fresh_store);
        prop_assert_eq!(fresh.resume_from_storage(), last);
    }

    #[test]
    fn policy_never_leaves_a_role_unwritten(
        primary in proptest::option::of(hex_color()),
        background in proptest::option::of(hex_color()),
        font in proptest::option::of("[a-z#0-9]{0,8}"),
    ) {
        let policy = BrandingPolicy {
            primary_color: primary,
            background_color_dark: background,
            font_color: font,
            ..BrandingPolicy::default()
        };
        let mut ctx = ThemeContext::in_memory();
        let report = ctx.apply_policy(&policy);
        for mode in ThemeMode::ALL {
            for role in Role::PALETTE_ROLES {
                prop_assert!(ctx.palette(role, mode).is_some());
            }
            prop_assert!(ctx.text_color(mode).is_some());
        }
        for fallback in &report.fallbacks {
            prop_assert!(fallback.rejection.is_diagnostic());
        }
    }
}
