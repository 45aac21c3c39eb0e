//! Fixed narrative text shown between the data-driven parts of the dashboard

pub const OVERVIEW: &str = "\
This report follows the assembly and annotation of a eubacterial genome \
from raw reads to annotated genes. The workflow consists of:

1. Quality checking input sequences.
2. Cleaning and trimming sequences.
3. Assembling the genome.
4. Comparing the assemblies.
5. Predicting and annotating genes.
6. Presenting the findings.";

pub const QUALITY_CHECK: &str =
    "Input reads were quality checked with **FastQC** before any processing.";

pub const CLEANING: &str = "\
Cleaning and trimming remove adapters and low-quality sequence so that \
downstream steps work on reliable reads. Tools used:

- **Trim Galore** for initial cleaning.
- **Cutadapt** for trimming adapters and adjusting sequence lengths.

**Trimming rules:**

- Single-end reads: sequences shorter than 50 bp removed.
- Paired-end reads: sequences shorter than 50 bp trimmed.
- Mate-pair reads (3 kb): sequences kept between 50 and 400 bp, adapters removed.";

pub const ASSEMBLY: &str = "\
Assembly joins sequencing reads into longer contiguous sequences. Two \
families of methods were used:

1. **Overlap-Layout-Consensus (OLC)** with Newbler.
2. **De Bruijn graphs** with Velvet and SOAPdenovo.

**Assembly variants:**

- **Newbler:** single-end (overlap) and paired-end (no overlap) reads.
- **SOAPdenovo:** without mate-pair reads.
- **Newbler with mate pairs:** adds the 3 kb mate-pair library.";

pub const KEY_METRICS: &str = "\
**Key metrics:**

- **N50:** assembly continuity. Higher values mean longer contigs.
- **L50:** fragmentation. Lower values mean fewer contigs cover half of the genome.";

pub const GENE_PREDICTION: &str = "\
**Gene prediction:** genes and coding sequences (CDS) were identified with \
**Glimmer** and annotated with BLAST searches against reference databases.

The distribution of predicted gene lengths is shown below.";

pub const BLAST: &str = "\
Top hits for the predicted genes. The search was restricted to \
Burkholderia cenocepacia, the organism the hits point to.";

pub const GENE_LENGTH_TITLE: &str = "Gene Length Distribution";
pub const GENE_LENGTH_AXIS: &str = "Gene Length (bp)";
