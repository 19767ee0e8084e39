//! Command-line interface for batch maze generation from PNG files

use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::algorithm::executor::{GenerationRequest, Pipeline};
use crate::io::configuration::{
    DEFAULT_MAZE_HEIGHT, DEFAULT_MAZE_WIDTH, DEFAULT_SEED, OUTPUT_SUFFIX,
};
use crate::io::error::{MazeError, Result, invalid_target};
use crate::io::progress::ProgressManager;
use crate::io::store::ImageStore;

#[derive(Parser)]
#[command(name = "edgemaze")]
#[command(
    author,
    version,
    about = "Generate text mazes whose solutions trace image contours"
)]
/// Command-line arguments for the maze generation tool
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Maze width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_MAZE_WIDTH)]
    pub width: usize,

    /// Maze height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_MAZE_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    store: Arc<ImageStore>,
    pipeline: Pipeline,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let store = Arc::new(ImageStore::new());
        let pipeline = Pipeline::new(Arc::clone(&store));
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            store,
            pipeline,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, generation, or output
    /// writing fails for any file.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            Self::process_file(
                file,
                &self.cli,
                &self.store,
                &self.pipeline,
                self.progress_manager.as_mut(),
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_target(&"Target file must be a PNG image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(&"Target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }
        !Self::output_path(input_path).exists()
    }

    fn process_file(
        input_path: &Path,
        cli: &Cli,
        store: &Arc<ImageStore>,
        pipeline: &Pipeline,
        mut progress: Option<&mut ProgressManager>,
    ) -> Result<()> {
        let start_time = Instant::now();
        if let Some(ref mut pm) = progress {
            pm.start_file(input_path);
        }

        let bytes = std::fs::read(input_path).map_err(|e| MazeError::FileSystem {
            path: input_path.to_path_buf(),
            operation: "read image",
            source: e,
        })?;

        let name = input_path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        let handle = store.store(bytes, &name);

        let request = GenerationRequest {
            handle,
            width: cli.width,
            height: cli.height,
        };
        let artifact = pipeline.generate(&request, cli.seed)?;

        let output_path = Self::output_path(input_path);
        std::fs::write(&output_path, &artifact.text).map_err(|e| MazeError::FileSystem {
            path: output_path.clone(),
            operation: "write maze",
            source: e,
        })?;

        if let Some(ref mut pm) = progress {
            let display_name = store
                .original_name(&request.handle)
                .unwrap_or_else(|| input_path.display().to_string());
            pm.finish_file(format!(
                "{display_name}: {}x{} {} solution, {} cells, {:.1}s",
                artifact.metadata.width,
                artifact.metadata.height,
                artifact.metadata.difficulty,
                artifact.metadata.solution_length,
                start_time.elapsed().as_secs_f64()
            ));
        }

        Ok(())
    }

    fn output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.txt", stem.to_string_lossy(), OUTPUT_SUFFIX);

        input_path.parent().map_or_else(
            || PathBuf::from(&output_name),
            |parent| parent.join(&output_name),
        )
    }
}
