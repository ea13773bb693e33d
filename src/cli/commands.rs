//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::{Component, Path, PathBuf};

use crate::codegen::{ServerTypes, artifact_path, path_conflict};
use crate::manifest::{Manifest, ManifestError};
use crate::output::ArtifactWriter;
use crate::render::{RenderedArtifact, render_all, render_artifact};

use super::{CliError, CliResult, ExitCode, GenerateOptions};

/// Generate, render and write the server types file of every service.
pub fn generate(manifest_path: &Path, output_dir: &Path, dry_run: bool, options: &GenerateOptions) -> CliResult<ExitCode> {
    validate_output_dir(output_dir)?;
    let manifest = load_manifest(manifest_path)?;
    let rendered = render_manifest(&manifest, options)?;

    let writer = ArtifactWriter::new(output_dir);
    if dry_run {
        for artifact in &rendered {
            println!("{}", writer.resolve(&artifact.path).display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let written = writer
        .write_all(&rendered)
        .map_err(|e| CliError::failure(format!("Error writing output: {}", e)))?;
    println!("Generated {} file(s) in {}", written.len(), output_dir.display());
    Ok(ExitCode::SUCCESS)
}

/// Print the artifact path of every service, one per line.
pub fn print_paths(manifest_path: &Path, options: &GenerateOptions) -> CliResult<ExitCode> {
    let manifest = load_manifest(manifest_path)?;
    for path in service_paths(&manifest, options) {
        println!("{}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the rendered artifact of one service.
pub fn emit_service(manifest_path: &Path, service: &str, options: &GenerateOptions) -> CliResult<ExitCode> {
    let manifest = load_manifest(manifest_path)?;
    let source = render_service(&manifest, service, options)
        .map_err(|e| CliError::failure(format!("{} in {}", e, manifest_path.display())))?;
    print!("{}", source);
    Ok(ExitCode::SUCCESS)
}

/// Generate and render every service in one run.
///
/// Fails before anything is written when two services resolve to the same file.
fn render_manifest(manifest: &Manifest, options: &GenerateOptions) -> CliResult<Vec<RenderedArtifact>> {
    let artifacts = ServerTypes::new(options.generator_config()).generate(&manifest.services);
    if let Some((first, second)) = path_conflict(&artifacts) {
        return Err(CliError::failure(format!(
            "Services '{}' and '{}' both generate {}",
            first.service,
            second.service,
            first.path.display()
        )));
    }
    render_all(&artifacts, &options.render_config())
        .map_err(|e| CliError::failure(format!("Code generation error: {}", e)))
}

fn service_paths(manifest: &Manifest, options: &GenerateOptions) -> Vec<PathBuf> {
    let config = options.generator_config();
    manifest
        .services
        .iter()
        .map(|service| artifact_path(&config, &service.name))
        .collect()
}

/// Render one service's artifact.
///
/// The whole run is generated so that transform helpers already emitted by earlier services are left out, exactly
/// as they would be when writing every file.
fn render_service(manifest: &Manifest, service: &str, options: &GenerateOptions) -> CliResult<String> {
    let artifacts = ServerTypes::new(options.generator_config()).generate(&manifest.services);

    let Some(artifact) = artifacts.iter().find(|a| a.service == service) else {
        return Err(CliError::failure(format!("Service '{}' not found", service)));
    };

    render_artifact(artifact, &options.render_config())
        .map_err(|e| CliError::failure(format!("Code generation error: {}", e)))
}

/// Load a manifest, rendering decode failures as a labelled diagnostic.
fn load_manifest(path: &Path) -> CliResult<Manifest> {
    Manifest::load(path).map_err(|e| match e {
        ManifestError::Decode { .. } => CliError::failure(format!("{:?}", miette::Report::new(e))),
        other => CliError::failure(format!("Error: {}", other)),
    })
}

/// Validate the output directory to prevent path traversal.
///
/// This function ensures:
/// - The path doesn't contain `..` components
/// - Absolute paths are allowed but reported with a warning
fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    if out_dir.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CliError::failure(format!(
            "Output directory '{}' contains path traversal (..)",
            out_dir.display()
        )));
    }

    if out_dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            out_dir.display()
        );
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::process;

    const SHOP: &str = "tests/fixtures/shop.json";

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("convgen_cli_{}_{}", tag, process::id()))
    }

    fn options() -> GenerateOptions {
        GenerateOptions {
            protocol: "grpc".to_string(),
            gen_pkg: "crate::generated".to_string(),
            gen_dir: PathBuf::from("gen"),
            validation_error: "ValidationError".to_string(),
            strict: false,
        }
    }

    fn shop() -> Manifest {
        Manifest::load(SHOP).unwrap()
    }

    #[test]
    fn test_generate_writes_every_service() {
        let root = temp_root("write");
        let code = generate(Path::new(SHOP), &root, false, &options()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let order = fs::read_to_string(root.join("gen/grpc/order_service/server/types.rs")).unwrap();
        let inventory = fs::read_to_string(root.join("gen/grpc/inventory/server/types.rs")).unwrap();
        assert!(order.contains("fn NewPlacePayload("));
        assert!(order.contains("fn pb_item_to_svc_item("));
        assert!(inventory.contains("fn NewRestockPayload("));
        assert!(!inventory.contains("fn pb_item_to_svc_item("));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_generate_dry_run_writes_nothing() {
        let root = temp_root("dry_run");
        let code = generate(Path::new(SHOP), &root, true, &options()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(!root.exists());
    }

    #[test]
    fn test_generate_rejects_traversal_before_reading() {
        let err = generate(Path::new(SHOP), Path::new("../out"), false, &options()).unwrap_err();
        assert!(err.message.contains("path traversal"));
    }

    #[test]
    fn test_generate_refuses_colliding_paths() {
        let root = temp_root("collide");
        fs::create_dir_all(&root).unwrap();
        let manifest_path = root.join("collide.json");
        fs::write(
            &manifest_path,
            r#"{"services": [{"name": "Order Service"}, {"name": "OrderService"}]}"#,
        )
        .unwrap();

        for dry_run in [true, false] {
            let err = generate(&manifest_path, &root.join("out"), dry_run, &options()).unwrap_err();
            assert_eq!(err.exit_code, ExitCode::FAILURE);
            assert!(err.message.contains("'Order Service'"));
            assert!(err.message.contains("'OrderService'"));
        }
        assert!(!root.join("out").exists());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_service_paths_in_manifest_order() {
        let paths = service_paths(&shop(), &options());
        assert_eq!(
            paths,
            vec![
                PathBuf::from("gen/grpc/order_service/server/types.rs"),
                PathBuf::from("gen/grpc/inventory/server/types.rs"),
            ]
        );
    }

    #[test]
    fn test_render_service_leaves_out_earlier_helpers() {
        let source = render_service(&shop(), "Inventory", &options()).unwrap();
        assert!(source.starts_with("//! Inventory grpc server types\n"));
        assert!(source.contains("fn pb_warehouse_to_svc_warehouse("));
        assert!(!source.contains("fn pb_item_to_svc_item("));
    }

    #[test]
    fn test_render_service_unknown_name() {
        let err = render_service(&shop(), "Shipping", &options()).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert_eq!(err.message, "Service 'Shipping' not found");
    }

    #[test]
    fn test_emit_service_unknown_name_mentions_manifest() {
        let err = emit_service(Path::new(SHOP), "Shipping", &options()).unwrap_err();
        assert!(err.message.contains("Service 'Shipping' not found"));
        assert!(err.message.contains(SHOP));
    }

    #[test]
    fn test_validate_output_dir_rejects_traversal() {
        assert!(validate_output_dir(Path::new("../outside")).is_err());
        assert!(validate_output_dir(Path::new("out/../../x")).is_err());
    }

    #[test]
    fn test_validate_output_dir_accepts_relative() {
        assert!(validate_output_dir(Path::new("target/convgen")).is_ok());
        assert!(validate_output_dir(Path::new(".")).is_ok());
    }

    #[test]
    fn test_load_manifest_missing_file() {
        let err = load_manifest(Path::new("no/such/manifest.json")).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("no/such/manifest.json"));
    }
}
