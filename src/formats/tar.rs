use crate::formats::{ExtractError, TarCompression};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tar::Archive;
use tracing::trace;

// Enough for every compression magic we look for
const SNIFF_SIZE: usize = 16;

impl TarCompression {
    pub fn detect(header: &[u8]) -> Self {
        if infer::archive::is_gz(header) {
            TarCompression::Gzip
        } else if infer::archive::is_bz2(header) {
            TarCompression::Bzip2
        } else if infer::archive::is_xz(header) {
            TarCompression::Xz
        } else {
            TarCompression::None
        }
    }

    pub fn decoder<'a>(self, reader: impl Read + 'a) -> Box<dyn Read + 'a> {
        match self {
            TarCompression::None => Box::new(reader),
            TarCompression::Gzip => Box::new(flate2::read::MultiGzDecoder::new(reader)),
            TarCompression::Bzip2 => Box::new(bzip2::read::MultiBzDecoder::new(reader)),
            TarCompression::Xz => Box::new(liblzma::read::XzDecoder::new(reader)),
        }
    }
}

fn sniff_compression(file: &mut File) -> std::io::Result<TarCompression> {
    let mut header = Vec::with_capacity(SNIFF_SIZE);
    file.by_ref()
        .take(SNIFF_SIZE as u64)
        .read_to_end(&mut header)?;
    file.rewind()?;
    Ok(TarCompression::detect(&header))
}

pub fn extract(source: &Path, dest: &Path) -> Result<(), ExtractError> {
    let mut file = File::open(source)?;
    let compression = sniff_compression(&mut file)?;
    trace!(%compression, "opening tar");
    let reader = compression.decoder(BufReader::with_capacity(1024 * 1024, file));
    let mut archive = Archive::new(reader);
    archive.unpack(dest)?;
    Ok(())
}
