/*!

This is the long-form manual for `dialect_tally` and `dialectvotes`.

## Input format

The survey responses are read from a CSV file (comma separated, UTF-8).
Each row is one response:

```text
dýl,Praha
Pozdeji, Brno ,2023-04-01
později,Praha
```

Only the first two columns are read: the answer, then the region (district).
Any following column is ignored. The first row is treated as a response like any
other: use `--has-headers` if the file starts with a header row.

A row is dropped, without error, when:
- it has fewer than two columns
- the answer is not a known spelling of an accepted answer
- the region is blank

## Accepted answers

| answer    | accepted spellings                              |
|-----------|-------------------------------------------------|
| `dýl`     | `dyl`, `dýl`, in any case                      |
| `později` | `pozdeji`, `později`, in any case, any accents  |

Before the lookup, the answer is trimmed, composed (NFC), lower-cased, decomposed (NFD)
and stripped of its combining marks: `  DÝL ` and `dyl` are the same answer.
There is no correction of typos: `dyll` is dropped.

Region names are only trimmed and composed. `Praha` and `praha` are two different regions.

## Output format

A JSON document with one entry per region, sorted by region name:

```text
{
  "Brno": {
    "total": 1,
    "counts": {
      "později": 1
    },
    "percentages": {
      "později": 100.0
    },
    "dominant": "později",
    "dominantShare": 100.0
  }
}
```

The answers in `counts` and `percentages` are listed in the order they first appear in
the region. The percentages are rounded half-up to 2 decimals. When two answers have the
same count, the dominant answer is the one that appeared first in the region.

 */
