//! Static page chrome: style block, checklist script, header and footer.

use crate::escape::{html_escape, js_string};

/// localStorage key for the done set. Fixed so pages regenerated from the
/// same sheet keep their progress.
pub const STORAGE_KEY: &str = "donePapers";

/// Page stylesheet, adapted per-class from the source tool's layout.
pub(crate) const STYLE: &str = r#"
        body {
            font-family: Arial, sans-serif;
            margin: 20px;
            line-height: 1.6;
        }
        .header {
            background: #f0f0f0;
            padding: 20px;
            border-radius: 5px;
            margin-bottom: 20px;
        }
        .paper {
            border: 1px solid #ddd;
            padding: 15px;
            margin: 10px 0;
            border-radius: 5px;
            background: white;
        }
        .paper:hover {
            background: #f9f9f9;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
        }
        .paper-title {
            font-weight: bold;
            color: #2c3e50;
            margin-bottom: 5px;
            font-size: 16px;
        }
        .paper-meta {
            color: #7f8c8d;
            font-size: 14px;
            margin-bottom: 10px;
        }
        .paper-done {
            margin-top: 10px;
        }
        .search-btn {
            display: inline-block;
            margin: 5px 10px 5px 0;
            padding: 8px 15px;
            background: #4285f4;
            color: white;
            text-decoration: none;
            border-radius: 4px;
            font-size: 14px;
        }
        .search-btn:hover {
            background: #3367d6;
        }
        .search-btn.sciencedirect {
            background: #ff6b35;
        }
        .search-btn.researchgate {
            background: #00ccbb;
        }
        .progress {
            margin: 20px 0;
            padding: 10px;
            background: #e8f4fd;
            border-radius: 5px;
        }
        .progress-track {
            background: #ddd;
            height: 10px;
            border-radius: 5px;
            margin-top: 5px;
        }
        #progressBar {
            background: #4CAF50;
            height: 100%;
            width: 0%;
            border-radius: 5px;
        }
        .controls {
            margin: 20px 0;
        }
        .control-btn {
            padding: 10px 20px;
            margin: 0 10px 10px 0;
            background: #4CAF50;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
        }
        .paper-number {
            float: right;
            background: #4285f4;
            color: white;
            padding: 2px 8px;
            border-radius: 12px;
            font-size: 12px;
        }
        .footer {
            margin-top: 40px;
            padding: 20px;
            text-align: center;
            color: #666;
            border-top: 1px solid #eee;
        }
        .footer ol {
            text-align: left;
            display: inline-block;
            margin: 10px auto;
        }
"#;

/// Checklist widget script. Tokens are substituted by [`page_script`].
const SCRIPT_TEMPLATE: &str = r#"    <script>
        // Done-state persistence seam: swap this object to change backends.
        const store = {
            key: '__KEY__',
            load() {
                try {
                    return new Set(JSON.parse(localStorage.getItem(this.key)) || []);
                } catch (e) {
                    return new Set();
                }
            },
            save(done) {
                localStorage.setItem(this.key, JSON.stringify([...done]));
            }
        };

        const TOTAL = __TOTAL__;
        const BATCH_SIZE = __BATCH__;
        const PAGE_TITLE = '__TITLE__';

        let donePapers = store.load();

        window.onload = function() {
            donePapers.forEach(num => {
                const checkbox = document.getElementById('check' + num);
                const paper = document.getElementById('paper' + num);
                if (checkbox) checkbox.checked = true;
                if (paper) paper.style.opacity = '0.6';
            });
            updateProgress();
        };

        function markDone(num) {
            if (donePapers.has(num)) return;
            donePapers.add(num);
            store.save(donePapers);

            const paper = document.getElementById('paper' + num);
            if (paper) paper.style.opacity = '0.6';
            const checkbox = document.getElementById('check' + num);
            if (checkbox) checkbox.checked = true;

            updateProgress();
        }

        function togglePaper(num) {
            const checkbox = document.getElementById('check' + num);
            const paper = document.getElementById('paper' + num);

            if (checkbox.checked) {
                donePapers.add(num);
                if (paper) paper.style.opacity = '0.6';
            } else {
                donePapers.delete(num);
                if (paper) paper.style.opacity = '1';
            }

            store.save(donePapers);
            updateProgress();
        }

        function openBatch() {
            const undone = [];
            for (let i = 1; i <= TOTAL; i++) {
                if (!donePapers.has(i)) undone.push(i);
            }

            if (undone.length === 0) {
                alert('Every reference is already marked as retrieved.');
                return;
            }

            if (!confirm('Open search pages for ' + undone.length + ' unretrieved references?')) {
                return;
            }

            // Cap the batch so a long list cannot flood the browser with tabs.
            const batch = Math.min(BATCH_SIZE, undone.length);
            for (let i = 0; i < batch; i++) {
                const link = document.querySelector('#paper' + undone[i] + ' a[data-primary]');
                if (link) {
                    window.open(link.href, '_blank');
                    markDone(undone[i]);
                }
            }

            if (undone.length > batch) {
                alert('Opened the first ' + batch + '; run the batch again for the rest.');
            }
        }

        function markAllDone() {
            if (!confirm('Mark every reference as retrieved?')) return;

            for (let i = 1; i <= TOTAL; i++) {
                const checkbox = document.getElementById('check' + i);
                const paper = document.getElementById('paper' + i);
                if (checkbox) checkbox.checked = true;
                if (paper) paper.style.opacity = '0.6';
                donePapers.add(i);
            }

            store.save(donePapers);
            updateProgress();
        }

        function showUndoneOnly() {
            const papers = document.querySelectorAll('.paper');
            papers.forEach(paper => {
                const id = parseInt(paper.id.replace('paper', ''), 10);
                paper.style.display = donePapers.has(id) ? 'none' : 'block';
            });
            alert('Showing ' + (TOTAL - donePapers.size) + ' unretrieved references.');
        }

        function updateProgress() {
            const done = donePapers.size;
            const percent = TOTAL > 0 ? Math.round((done / TOTAL) * 100) : 0;

            document.getElementById('progress').textContent = done + '/' + TOTAL;
            document.getElementById('progressBar').style.width = percent + '%';
            document.title = PAGE_TITLE + ' (' + done + '/' + TOTAL + ') - ' + percent + '%';
        }

        // Ctrl+Shift+D marks everything retrieved.
        document.addEventListener('keydown', function(e) {
            if (e.ctrlKey && e.shiftKey && e.key === 'D') {
                markAllDone();
            }
        });
    </script>"#;

/// Build the embedded checklist script for a page.
pub(crate) fn page_script(total: usize, batch_open_size: usize, page_title: &str) -> String {
    SCRIPT_TEMPLATE
        .replace("__KEY__", STORAGE_KEY)
        .replace("__TOTAL__", &total.to_string())
        .replace("__BATCH__", &batch_open_size.to_string())
        .replace("__TITLE__", &js_string(page_title))
}

/// Build the page header block and control/progress widgets.
pub(crate) fn page_header(
    page_title: &str,
    total: usize,
    batch_open_size: usize,
    generated_at: &str,
) -> String {
    let title = html_escape(page_title);
    format!(
        r#"    <div class="header">
        <h1>📚 {title}</h1>
        <p>Found <strong>{total}</strong> references. Use the buttons below to search for each one.</p>
        <p>Generated: {generated_at}</p>
    </div>

    <div class="controls">
        <button class="control-btn" onclick="openBatch()">Open next {batch_open_size} searches</button>
        <button class="control-btn" onclick="markAllDone()">Mark all retrieved</button>
        <button class="control-btn" onclick="showUndoneOnly()">Show unretrieved only</button>
    </div>

    <div class="progress">
        Progress: <span id="progress">0/{total}</span>
        <div class="progress-track">
            <div id="progressBar"></div>
        </div>
    </div>
"#
    )
}

/// Build the instructions footer.
pub(crate) fn page_footer(generated_at: &str) -> String {
    format!(
        r#"    <div class="footer">
        <p>How to use this page:</p>
        <ol>
            <li>Click a search button to open that reference's search in a new tab.</li>
            <li>Find and download the document from the search results.</li>
            <li>Back here, tick "Retrieved" (clicked links are marked automatically).</li>
            <li>Progress is saved in this browser and survives closing the page.</li>
        </ol>
        <p>Generated: {generated_at}</p>
    </div>
"#
    )
}
