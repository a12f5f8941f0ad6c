//! Wiring of both surfaces into a host, and reconfiguration at runtime.
//!
//! The host is reached through [`Workspace`]. The editing surface is offered
//! as an [`EditorExtension`] that the host re-reads on `update_options`; the
//! reading surface is a post-processor that, once registered, stays
//! registered, which is why re-registration goes through a [`RewriterGuard`].

use double_colon_conceal_config::Settings;
use log::debug;

use crate::{
    live::EditorExtension,
    rendered::{PostProcessor, RewriterGuard, conceal_post_processor},
};

/// What the plugin needs from its host.
pub trait Workspace {
    /// Adds a post-processor to the reading surface for good.
    fn register_post_processor(&mut self, processor: PostProcessor);

    /// Tells every open editor to pick up the current extension, replacing
    /// any controller built from an earlier one. `None` means no overlay.
    fn update_options(&mut self, extension: Option<&EditorExtension>);

    /// Re-renders the reading view that is currently shown, if any.
    fn rerender_active_view(&mut self);
}

#[derive(Debug)]
pub struct ConcealPlugin {
    settings: Settings,
    guard: RewriterGuard,
    extension: Option<EditorExtension>,
}

impl ConcealPlugin {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            guard: RewriterGuard::new(),
            extension: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The editor extension in force, `None` while edit mode is off.
    pub fn extension(&self) -> Option<&EditorExtension> {
        self.extension.as_ref()
    }

    pub fn load<W: Workspace + ?Sized>(&mut self, workspace: &mut W) {
        debug!("loading with {:?}", self.settings);
        self.rebuild_extension();
        self.register_rewriter(workspace);
        workspace.update_options(self.extension.as_ref());
        workspace.rerender_active_view();
    }

    pub fn unload<W: Workspace + ?Sized>(&mut self, workspace: &mut W) {
        debug!("unloading");
        self.extension = None;
        self.guard.revoke_all();
        workspace.update_options(None);
        workspace.rerender_active_view();
    }

    pub fn set_edit_mode<W: Workspace + ?Sized>(&mut self, enabled: bool, workspace: &mut W) {
        self.settings.edit_mode = enabled;
        self.refresh_editor(workspace);
    }

    pub fn set_edit_replacement<W: Workspace + ?Sized>(
        &mut self,
        replacement: Option<String>,
        workspace: &mut W,
    ) {
        self.settings.edit_replacement = Settings::replacement_or_empty(replacement);
        self.refresh_editor(workspace);
    }

    pub fn set_read_replacement<W: Workspace + ?Sized>(
        &mut self,
        replacement: Option<String>,
        workspace: &mut W,
    ) {
        self.settings.read_replacement = Settings::replacement_or_empty(replacement);
        self.register_rewriter(workspace);
        workspace.rerender_active_view();
    }

    fn rebuild_extension(&mut self) {
        self.extension = self
            .settings
            .edit_mode
            .then(|| EditorExtension::new(self.settings.edit_replacement.clone()));
    }

    fn refresh_editor<W: Workspace + ?Sized>(&mut self, workspace: &mut W) {
        self.rebuild_extension();
        debug!(
            "editor extension {}",
            if self.extension.is_some() { "enabled" } else { "disabled" }
        );
        workspace.update_options(self.extension.as_ref());
    }

    fn register_rewriter<W: Workspace + ?Sized>(&mut self, workspace: &mut W) {
        let ticket = self.guard.issue();
        debug!("registering rewriter #{}", ticket.id());
        workspace.register_post_processor(conceal_post_processor(
            self.settings.read_replacement.clone(),
            ticket,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        live::{EditorMode, EditorState, LiveOverlayController},
        rendered::RenderPipeline,
    };
    use pretty_assertions::assert_eq;

    /// A host with one reading view and one editor.
    struct TestWorkspace {
        pipeline: RenderPipeline,
        reading_source: String,
        reading_html: Option<String>,
        editor: EditorState,
        controller: Option<LiveOverlayController>,
        rerenders: usize,
    }

    impl TestWorkspace {
        fn new(text: &str) -> Self {
            let mut editor = EditorState::new(text);
            editor.set_cursor(editor.len());
            Self {
                pipeline: RenderPipeline::new(),
                reading_source: text.to_string(),
                reading_html: None,
                editor,
                controller: None,
                rerenders: 0,
            }
        }

        fn concealed_lines(&self) -> Vec<String> {
            let Some(controller) = &self.controller else {
                return vec![];
            };
            (1..=self.editor.line_count())
                .map(|n| {
                    let line = crate::live::TextBuffer::line(&self.editor, n);
                    controller.decorations().display_line(&line)
                })
                .collect()
        }
    }

    impl Workspace for TestWorkspace {
        fn register_post_processor(&mut self, processor: PostProcessor) {
            self.pipeline.register_post_processor(processor);
        }

        fn update_options(&mut self, extension: Option<&EditorExtension>) {
            self.controller = extension.map(|ext| ext.attach(&self.editor));
        }

        fn rerender_active_view(&mut self) {
            self.rerenders += 1;
            self.reading_html = Some(self.pipeline.render(&self.reading_source).to_html());
        }
    }

    fn edit_mode_settings() -> Settings {
        Settings {
            edit_mode: true,
            read_replacement: "→".to_string(),
            edit_replacement: "·".to_string(),
        }
    }

    #[test]
    fn load_wires_both_surfaces() {
        let mut ws = TestWorkspace::new("Key:: v\n");
        let mut plugin = ConcealPlugin::new(edit_mode_settings());
        plugin.load(&mut ws);

        assert_eq!(ws.reading_html.as_deref(), Some("<div><p>Key→ v</p></div>"));
        assert_eq!(ws.concealed_lines(), vec!["Key· v", ""]);
    }

    #[test]
    fn default_settings_leave_editor_alone() {
        let mut ws = TestWorkspace::new("Key:: v\n");
        let mut plugin = ConcealPlugin::new(Settings::default());
        plugin.load(&mut ws);

        assert!(plugin.extension().is_none());
        assert!(ws.controller.is_none());
        assert_eq!(ws.reading_html.as_deref(), Some("<div><p>Key: v</p></div>"));
    }

    #[test]
    fn re_registering_twice_conceals_once() {
        let mut ws = TestWorkspace::new("a:: b");
        let mut plugin = ConcealPlugin::new(Settings {
            read_replacement: "x".to_string(),
            ..Settings::default()
        });
        plugin.load(&mut ws);
        plugin.set_read_replacement(Some("·".to_string()), &mut ws);
        plugin.set_read_replacement(Some(":".to_string()), &mut ws);

        assert_eq!(ws.pipeline.post_processor_count(), 3);
        // The first rewriter would win if stale ones still ran
        assert_eq!(ws.reading_html.as_deref(), Some("<div><p>a: b</p></div>"));
        assert_eq!(ws.rerenders, 3);
    }

    #[test]
    fn missing_read_replacement_is_empty_glyph() {
        let mut ws = TestWorkspace::new("a:: b");
        let mut plugin = ConcealPlugin::new(Settings::default());
        plugin.load(&mut ws);
        plugin.set_read_replacement(None, &mut ws);

        assert_eq!(plugin.settings().read_replacement, "");
        assert_eq!(ws.reading_html.as_deref(), Some("<div><p>a b</p></div>"));
    }

    #[test]
    fn disabling_edit_mode_drops_overlay_and_keeps_text() {
        let mut ws = TestWorkspace::new("Key:: v\n");
        let mut plugin = ConcealPlugin::new(edit_mode_settings());
        plugin.load(&mut ws);
        plugin.set_edit_mode(false, &mut ws);

        assert!(ws.controller.is_none());
        assert!(!plugin.settings().edit_mode);
        assert_eq!(ws.editor.text(), "Key:: v\n");
    }

    #[test]
    fn new_edit_replacement_replaces_controller() {
        let mut ws = TestWorkspace::new("Key:: v\n");
        let mut plugin = ConcealPlugin::new(edit_mode_settings());
        plugin.load(&mut ws);
        plugin.set_edit_replacement(Some("=".to_string()), &mut ws);

        assert_eq!(ws.controller.as_ref().map(|c| c.replacement()), Some("="));
        assert_eq!(ws.concealed_lines()[0], "Key= v");
    }

    #[test]
    fn source_mode_still_clears_after_reconfigure() {
        let mut ws = TestWorkspace::new("Key:: v\n");
        let mut plugin = ConcealPlugin::new(edit_mode_settings());
        plugin.load(&mut ws);

        let update = ws.editor.set_mode(EditorMode::Source);
        if let Some(controller) = ws.controller.as_mut() {
            controller.update(&ws.editor, update);
        }
        assert_eq!(ws.concealed_lines(), vec!["Key:: v", ""]);
    }

    #[test]
    fn unload_restores_plain_rendering() {
        let mut ws = TestWorkspace::new("Key:: v\n");
        let mut plugin = ConcealPlugin::new(edit_mode_settings());
        plugin.load(&mut ws);
        plugin.unload(&mut ws);

        assert!(ws.controller.is_none());
        assert_eq!(ws.reading_html.as_deref(), Some("<div><p>Key:: v</p></div>"));
    }
}
