//! The default settings table for a fresh web UI install.
//!
//! The table is plain static data. [`default_table`] turns it into a
//! `serde_json` object once, on first use, keeping the declaration order so
//! that a freshly written `config.json` reads top to bottom like this file.

use serde_json::{Map, Value};
use std::sync::LazyLock;

/// A default setting value, restricted to the shapes the web UI stores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
    List(&'static [&'static str]),
}

impl DefaultValue {
    /// Convert to the JSON value written to disk.
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Null => Value::Null,
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Int(i) => Value::from(i),
            DefaultValue::Float(f) => Value::from(f),
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::List(items) => {
                Value::Array(items.iter().map(|s| Value::String(s.to_string())).collect())
            }
        }
    }
}

use DefaultValue::{Bool, Float, Int, List, Null, Str};

/// Every setting the merge tool guarantees to be present, in file order.
pub static DEFAULT_SETTINGS: &[(&str, DefaultValue)] = &[
    // Output directories
    ("outdir_samples", Str("")),
    ("outdir_txt2img_samples", Str("/output/txt2img-images")),
    ("outdir_img2img_samples", Str("/output/img2img-images")),
    ("outdir_extras_samples", Str("/output/extras-images")),
    ("outdir_grids", Str("")),
    ("outdir_txt2img_grids", Str("/output/txt2img-grids")),
    ("outdir_img2img_grids", Str("/output/img2img-grids")),
    ("outdir_save", Str("/output/saved")),

    // Saving images/grids
    ("save_to_dirs", Bool(true)),
    ("grid_save_to_dirs", Bool(true)),
    ("use_save_to_dirs_for_ui", Bool(true)),
    ("directories_filename_pattern", Str("[date]")),
    ("directories_max_prompt_words", Int(8)),

    // Upscaling and face restoration
    ("ESRGAN_tile", Int(192)),
    ("ESRGAN_tile_overlap", Int(8)),
    ("realesrgan_enabled_models", List(&["R-ESRGAN 4x+", "R-ESRGAN 4x+ Anime6B"])),
    ("upscaler_for_img2img", Null),
    ("face_restoration_model", Str("CodeFormer")),
    ("code_former_weight", Float(0.5)),
    ("face_restoration_unload", Bool(false)),

    // System
    ("show_warnings", Bool(false)),
    ("memmon_poll_rate", Int(8)),
    ("samples_log_stdout", Bool(false)),
    ("multiple_tqdm", Bool(true)),

    // Training
    ("unload_models_when_training", Bool(false)),
    ("pin_memory", Bool(false)),
    ("save_optimizer_state", Bool(false)),
    ("save_training_settings_to_txt", Bool(true)),
    ("dataset_filename_word_regex", Str("")),
    ("dataset_filename_join_string", Str(" ")),
    ("training_image_repeats_per_epoch", Int(1)),
    ("training_write_csv_every", Int(500)),
    ("training_xattention_optimizations", Bool(false)),
    ("training_enable_tensorboard", Bool(false)),
    ("training_tensorboard_save_images", Bool(false)),
    ("training_tensorboard_flush_every", Int(120)),

    // Stable Diffusion
    ("sd_model_checkpoint", Str("v1-5-pruned.safetensors")),
    ("sd_checkpoint_cache", Int(0)),
    ("sd_vae_checkpoint_cache", Int(0)),
    ("sd_vae", Str("Automatic")),
    ("sd_vae_as_default", Bool(true)),
    ("inpainting_mask_weight", Float(1.0)),
    ("initial_noise_multiplier", Float(1.0)),
    ("img2img_color_correction", Bool(false)),
    ("img2img_fix_steps", Bool(false)),
    ("img2img_background_color", Str("#ffffff")),
    ("enable_quantization", Bool(false)),
    ("enable_emphasis", Bool(true)),
    ("enable_batch_seeds", Bool(true)),
    ("comma_padding_backtrack", Int(20)),
    ("CLIP_stop_at_last_layers", Int(1)),
    ("upcast_attn", Bool(false)),
    ("use_old_emphasis_implementation", Bool(false)),
    ("use_old_karras_scheduler_sigmas", Bool(false)),
    ("no_dpmpp_sde_batch_determinism", Bool(false)),
    ("use_old_hires_fix_width_height", Bool(false)),

    // Interrogate
    ("interrogate_keep_models_in_memory", Bool(false)),
    ("interrogate_return_ranks", Bool(false)),
    ("interrogate_clip_num_beams", Int(1)),
    ("interrogate_clip_min_length", Int(24)),
    ("interrogate_clip_max_length", Int(48)),
    ("interrogate_clip_dict_limit", Int(1500)),
    ("interrogate_clip_skip_categories", List(&[])),
    ("interrogate_deepbooru_score_threshold", Float(0.5)),
    ("deepbooru_sort_alpha", Bool(true)),
    ("deepbooru_use_spaces", Bool(false)),
    ("deepbooru_escape", Bool(true)),
    ("deepbooru_filter_tags", Str("")),

    // Extra networks
    ("extra_networks_default_view", Str("cards")),
    ("extra_networks_default_multiplier", Float(1.0)),
    ("extra_networks_card_width", Int(0)),
    ("extra_networks_card_height", Int(0)),
    ("extra_networks_add_text_separator", Str(" ")),
    ("sd_hypernetwork", Str("None")),

    // User interface
    ("return_grid", Bool(true)),
    ("do_not_show_images", Bool(false)),
    ("send_seed", Bool(true)),
    ("send_size", Bool(true)),
    ("font", Str("")),
    ("js_modal_lightbox", Bool(true)),
    ("js_modal_lightbox_initially_zoomed", Bool(true)),
    ("show_progress_in_title", Bool(true)),
    ("samplers_in_dropdown", Bool(true)),
    ("dimensions_and_batch_together", Bool(true)),
    ("keyedit_precision_attention", Float(0.1)),
    ("keyedit_precision_extra", Float(0.05)),
    ("quicksettings", Str("sd_model_checkpoint")),
    ("hidden_tabs", List(&[])),
    ("ui_reorder", Str("inpaint, sampler, checkboxes, hires_fix, dimensions, cfg, seed, batch, override_settings, scripts")),
    ("ui_extra_networks_tab_reorder", Str("")),
    ("localization", Str("None")),

    // Live previews
    ("show_progressbar", Bool(true)),
    ("live_previews_enable", Bool(true)),
    ("show_progress_grid", Bool(true)),
    ("show_progress_every_n_steps", Int(10)),
    ("show_progress_type", Str("Approx NN")),
    ("live_preview_content", Str("Prompt")),
    ("live_preview_refresh_period", Int(1000)),
    ("hide_samplers", List(&[])),

    // Sampler parameters
    ("eta_ddim", Float(0.0)),
    ("eta_ancestral", Float(1.0)),
    ("ddim_discretize", Str("uniform")),
    ("s_churn", Float(0.0)),
    ("s_tmin", Float(0.0)),
    ("s_noise", Float(1.0)),
    ("eta_noise_seed_delta", Int(0)),
    ("always_discard_next_to_last_sigma", Bool(false)),

    // Postprocessing
    ("postprocessing_enable_in_main_ui", List(&[])),
    ("postprocessing_operation_order", List(&[])),
    ("upscaling_max_images_in_cache", Int(5)),

    // Extensions
    ("disabled_extensions", List(&[])),
    ("sd_checkpoint_hash", Str("")),

    // LoRA / LyCORIS
    ("sd_lora", Str("None")),
    ("lora_preferred_name", Str("Alias from file")),
    ("lora_add_hashes_to_infotext", Bool(true)),
    ("sd_lyco", Str("None")),
];

static DEFAULT_TABLE: LazyLock<Map<String, Value>> = LazyLock::new(|| {
    DEFAULT_SETTINGS
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_value()))
        .collect()
});

/// The default table as a JSON object.
pub fn default_table() -> &'static Map<String, Value> {
    &DEFAULT_TABLE
}

/// Look up the default for a single key.
pub fn default_value(key: &str) -> Option<&'static Value> {
    DEFAULT_TABLE.get(key)
}
