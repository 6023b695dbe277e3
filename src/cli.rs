// ============================================================================
// ShaderTune CLI — descriptor sources, language, and headless --check mode
// ============================================================================
//
//   shadertune                                  (built-in shaders only)
//   shadertune --shader crt.toml --shader grade.toml
//   shadertune --shader-dir shaders/ --lang de
//   shadertune --shader-dir shaders/ --check    (validate, no window)
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::error::TuneError;
use crate::format::format_value;
use crate::ops::shader_tune::SliderMapping;
use crate::shader::{self, SLOT_COUNT, ShaderDescriptor};

/// ShaderTune: tune shader parameters with sliders.
#[derive(Parser, Debug, Default)]
#[command(name = "shadertune", about = "Shader parameter tuning dialog")]
pub struct CliArgs {
    /// Shader descriptor file(s) (TOML). May be given more than once.
    #[arg(short, long = "shader", value_name = "FILE")]
    pub shaders: Vec<PathBuf>,

    /// Directory of `*.toml` shader descriptors.
    #[arg(long, value_name = "DIR")]
    pub shader_dir: Option<PathBuf>,

    /// UI language code (en, de, es, fr). Defaults to the system language.
    #[arg(short, long, value_name = "CODE")]
    pub lang: Option<String>,

    /// Skip the built-in example shaders.
    #[arg(long)]
    pub no_builtin: bool,

    /// Load and validate descriptors, print a summary and exit.
    #[arg(long)]
    pub check: bool,
}

/// Gather shaders from every configured source. Failures do not stop loading;
/// they are returned alongside whatever did load.
pub fn load_shaders(args: &CliArgs) -> (Vec<ShaderDescriptor>, Vec<TuneError>) {
    let mut shaders = if args.no_builtin {
        Vec::new()
    } else {
        shader::builtin_shaders()
    };
    let mut errors = Vec::new();

    if let Some(dir) = &args.shader_dir {
        match shader::load_dir(dir) {
            Ok(mut found) => shaders.append(&mut found),
            Err(e) => errors.push(e),
        }
    }
    for path in &args.shaders {
        match shader::load_file(path) {
            Ok(mut found) => shaders.append(&mut found),
            Err(e) => errors.push(e),
        }
    }
    (shaders, errors)
}

/// Headless validation. `0` when every source loaded, `1` otherwise.
pub fn run_check(args: &CliArgs) -> ExitCode {
    let (shaders, errors) = load_shaders(args);

    for shader in &shaders {
        println!("{} ({} settings)", shader.name, shader.setting_count());
        for slot in 0..SLOT_COUNT {
            let Some(setting) = shader.setting(slot) else {
                continue;
            };
            let mapping = SliderMapping::from_setting(setting);
            println!(
                "  [{}] {}: {} … {}, step {}, {} positions, default {}",
                slot,
                setting.name,
                format_value(setting.min),
                format_value(setting.max),
                format_value(mapping.step),
                mapping.max_position + 1,
                format_value(setting.default),
            );
            if setting.max < setting.min {
                println!("      warning: max is below min");
            }
            if setting.default < setting.min.min(setting.max) || setting.default > setting.max.max(setting.min) {
                println!("      warning: default lies outside the range");
            }
        }
    }

    for e in &errors {
        eprintln!("error: {}", e);
    }
    if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_shader_flags() {
        let args = CliArgs::parse_from(["shadertune", "-s", "a.toml", "--shader", "b.toml", "--lang", "de", "--check"]);
        assert_eq!(args.shaders, vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
        assert_eq!(args.lang.as_deref(), Some("de"));
        assert!(args.check);
        assert!(!args.no_builtin);
    }

    #[test]
    fn missing_files_are_reported_not_fatal() {
        let args = CliArgs {
            shaders: vec![PathBuf::from("/definitely/not/here.toml")],
            ..Default::default()
        };
        let (shaders, errors) = load_shaders(&args);
        assert_eq!(shaders.len(), shader::builtin_shaders().len());
        assert!(matches!(errors.as_slice(), [TuneError::Io { .. }]));
    }

    #[test]
    fn loads_a_descriptor_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.toml"),
            "name = \"Vignette\"\n[[settings]]\nname = \"Radius\"\nmin = 0.0\nmax = 1.0\ndefault = 0.7\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.toml"), "name = ").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let args = CliArgs {
            shader_dir: Some(dir.path().to_path_buf()),
            no_builtin: true,
            ..Default::default()
        };
        let (shaders, errors) = load_shaders(&args);

        assert!(errors.is_empty());
        assert_eq!(shaders.len(), 1);
        assert_eq!(shaders[0].name, "Vignette");
    }

    #[test]
    fn check_fails_when_a_source_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            shaders: vec![dir.path().join("absent.toml")],
            no_builtin: true,
            ..Default::default()
        };
        assert_eq!(run_check(&args), ExitCode::FAILURE);
    }
}
