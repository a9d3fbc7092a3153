use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use quill_core::text::{TextChange, TextSpan};
use quill_parser::{parse_source_file, parse_source_files, update_source_file, ParseOptions};

// An inventory module touching most declaration and expression forms.
const SOURCE: &str = r#"
/**
 * Stock kept per warehouse.
 * @template K
 */
export interface Stock<K extends string = string> {
    readonly sku: K;
    quantity: number;
    location?: { aisle: number; shelf: `${number}-${string}` };
}

export type Movement =
    | { kind: 'in'; amount: number }
    | { kind: 'out'; amount: number; reason?: string };

export enum Level { Empty, Low = 10, Full = 100 }

export abstract class Ledger<K extends string> {
    #entries = new Map<K, Stock<K>>();
    protected static readonly limit = 1_000;

    constructor(private readonly name: string) {}

    abstract audit(sku: K): Promise<boolean>;

    get size(): number {
        return this.#entries.size;
    }

    apply(sku: K, movement: Movement): Stock<K> | undefined {
        const entry = this.#entries.get(sku);
        if (!entry) return undefined;
        switch (movement.kind) {
            case 'in':
                entry.quantity += movement.amount;
                break;
            case 'out':
                entry.quantity = Math.max(0, entry.quantity - movement.amount);
                break;
        }
        return entry;
    }

    *low(threshold = Level.Low): Generator<K> {
        for (const [sku, { quantity }] of this.#entries) {
            if (quantity < threshold) yield sku;
        }
    }
}

export async function restock<K extends string>(
    ledger: Ledger<K>,
    skus: readonly K[],
    fetch: (sku: K) => Promise<number>,
): Promise<Record<K, number>> {
    const result = {} as Record<K, number>;
    for await (const amount of skus.map(fetch)) {
        result[skus[0]] ??= amount;
    }
    return result satisfies Partial<Record<K, number>>;
}

const summary = (items: Stock[]) =>
    items
        .filter(({ quantity }) => quantity > 0)
        .map((item, index) => `${index}: ${item.sku} x${item.quantity}`)
        .join('\n');

export default summary;
"#;

const MARKUP_SOURCE: &str = r#"
export function StockTable({ rows, onSelect }: Props) {
    return (
        <table className="stock">
            <thead>
                <tr><th>SKU</th><th>Quantity</th></tr>
            </thead>
            <tbody>
                {rows.map((row) => (
                    <tr key={row.sku} onClick={() => onSelect(row)}>
                        <td>{row.sku}</td>
                        <td>{row.quantity > 0 ? row.quantity : <em>none</em>}</td>
                    </tr>
                ))}
            </tbody>
        </table>
    );
}
"#;

fn bench_full_parse(c: &mut Criterion) {
    let options = ParseOptions::default();
    c.bench_function("parse_inventory_module", |b| {
        b.iter(|| black_box(parse_source_file("inventory.ts", black_box(SOURCE), &options)));
    });

    let markup_options = ParseOptions::for_file_name("table.tsx");
    c.bench_function("parse_markup_component", |b| {
        b.iter(|| black_box(parse_source_file("table.tsx", black_box(MARKUP_SOURCE), &markup_options)));
    });
}

fn bench_incremental_edit(c: &mut Criterion) {
    let options = ParseOptions::default();
    let original = parse_source_file("inventory.ts", SOURCE, &options);
    let target = SOURCE.find("1_000").unwrap_or(0) as u32;
    let change = TextChange::new(TextSpan::new(target, 1), 1);
    let edited = change.apply(SOURCE, "2");

    c.bench_function("update_single_character", |b| {
        b.iter_batched(
            || original.clone(),
            |file| black_box(update_source_file(file, &edited, change, false)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_parallel_files(c: &mut Criterion) {
    let options = ParseOptions::default();
    let files: Vec<(String, String)> = (0..32)
        .map(|i| (format!("module{i}.ts"), SOURCE.to_string()))
        .collect();
    c.bench_function("parse_32_files_in_parallel", |b| {
        b.iter(|| black_box(parse_source_files(black_box(&files), &options)));
    });
}

criterion_group!(benches, bench_full_parse, bench_incremental_edit, bench_parallel_files);
criterion_main!(benches);
